use anyhow::Result;

fn main() -> Result<()> {
    let matches = licprobe::cli::build_cli().get_matches();

    licprobe::init_logging(matches.get_count("verbose"));

    let code = licprobe::commands::execute(&matches)?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
