fn main() -> anyhow::Result<()> {
    tilesed::cli::cli()
}
