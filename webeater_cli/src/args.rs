use clap::Parser;
use std::path::PathBuf;
use webeater::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(author, version, about = "Webeater - Web Content Extractor", long_about = None)]
pub struct Args {
    /// URL to fetch content from. Starts an interactive prompt if omitted
    pub url: Option<String>,

    /// Config file to use
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Additional hint files to load
    #[arg(long, value_name = "NAME", num_args = 0..)]
    pub hints: Vec<String>,

    /// Directory searched for hint files before the built-in ones
    #[arg(long, value_name = "DIR", default_value = "hints")]
    pub hints_dir: PathBuf,

    /// Turn debug logging on
    #[arg(short, long)]
    pub debug: bool,

    /// Only print results or errors
    #[arg(short, long)]
    pub silent: bool,

    /// Return content as JSON
    #[arg(long)]
    pub json: bool,

    /// Return only the content, without title, images and links
    #[arg(long)]
    pub content_only: bool,

    /// Extract from a local HTML file instead of fetching the URL.
    /// The URL, if given, is used to complete relative links
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parse_flags() {
        let args = Args::try_parse_from([
            "weat",
            "https://example.com",
            "-s",
            "--json",
            "--content-only",
            "--hints-dir",
            "my-hints",
        ])
        .unwrap();

        assert_eq!(args.url.as_deref(), Some("https://example.com"));
        assert!(args.silent && args.json && args.content_only);
        assert!(!args.debug);
        assert_eq!(args.config.to_str(), Some("weat.json"));
        assert_eq!(args.hints_dir.to_str(), Some("my-hints"));
        assert!(args.hints.is_empty());
    }
}
