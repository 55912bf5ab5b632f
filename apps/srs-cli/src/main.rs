fn main() -> anyhow::Result<()> {
    srs_cli::run()
}
