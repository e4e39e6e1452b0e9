use clap::{Arg, ArgAction, Command};

/// Command line definition shared by the binary and the tests
pub fn build_cli() -> Command {
    Command::new("licprobe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reports tenant license counts and directory sync health as PRTG XML")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("JSON config file (default: <config dir>/licprobe/config.json)"),
        )
        .arg(
            Arg::new("access-token")
                .long("access-token")
                .value_name("TOKEN")
                .env("LICPROBE_ACCESS_TOKEN")
                .hide_env_values(true)
                .help("Pre-acquired Graph bearer token"),
        )
        .arg(
            Arg::new("tenant-id")
                .long("tenant-id")
                .value_name("ID")
                .env("LICPROBE_TENANT_ID")
                .help("Directory (tenant) id for the client credentials grant"),
        )
        .arg(
            Arg::new("client-id")
                .long("client-id")
                .value_name("ID")
                .env("LICPROBE_CLIENT_ID")
                .help("Application (client) id"),
        )
        .arg(
            Arg::new("client-secret")
                .long("client-secret")
                .value_name("SECRET")
                .env("LICPROBE_CLIENT_SECRET")
                .hide_env_values(true)
                .help("Client secret"),
        )
        .arg(
            Arg::new("tenant-name")
                .long("tenant-name")
                .value_name("NAME")
                .help("Namespace for SKU ids, as in <tenant-name>:ENTERPRISEPACK"),
        )
        .arg(
            Arg::new("graph-url")
                .long("graph-url")
                .value_name("URL")
                .value_parser(parse_url)
                .help("Graph endpoint (default: https://graph.microsoft.com)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .help("Upstream request timeout (default: 30)"),
        )
        .arg(
            Arg::new("include-sku")
                .short('i')
                .long("include-sku")
                .value_name("SKU_ID")
                .action(ArgAction::Append)
                .help("Only report these SKU ids; overrides --exclude-sku"),
        )
        .arg(
            Arg::new("exclude-sku")
                .short('e')
                .long("exclude-sku")
                .value_name("SKU_ID")
                .action(ArgAction::Append)
                .help("Skip these SKU ids"),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("PROFILE")
                .value_parser(["absolute", "detailed", "percent"])
                .help("Per-SKU channels to emit (default: absolute)"),
        )
        .arg(
            Arg::new("strict-exit")
                .long("strict-exit")
                .help("Exit with status 1 when an error document is emitted")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-skus")
                .long("list-skus")
                .help("Print the raw SKU records and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("With --list-skus, print JSON instead of a table")
                .action(ArgAction::SetTrue)
                .requires("list-skus"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log to stderr (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn parse_url(raw: &str) -> Result<String, String> {
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
