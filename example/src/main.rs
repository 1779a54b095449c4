fn main() -> anyhow::Result<()> {
    example::desktop_main()
}
