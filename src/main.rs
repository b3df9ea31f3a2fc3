fn main() -> anyhow::Result<()> {
    warpack::cli::run_cli()
}
