fn main() -> anyhow::Result<()> {
    presentation_strings::cli::run_cli()
}
