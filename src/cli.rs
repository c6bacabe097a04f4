use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(name = "getimg", version, about = "Download images from web page")]
#[command(group(ArgGroup::new("discovery").args(["embeded", "linked", "gallery"])))]
pub struct Cli {
    #[arg(value_name = "URL", help = "Page URL")]
    pub url: String,
    #[arg(short = 'e', long = "embeded-image", help = "Download embedded images (default)")]
    pub embeded: bool,
    #[arg(short = 'l', long = "linked-image", help = "Download linked images")]
    pub linked: bool,
    #[arg(short = 'g', long, help = "Download the image of a gallery detail page with its tags")]
    pub gallery: bool,
    #[arg(short = 'd', long, value_name = "DIR", help = "Download into DIR")]
    pub dir: Option<PathBuf>,
    #[arg(short = 't', long, value_name = "TAGS", help = "Tags attached to every image, use with -s")]
    pub tags: Option<String>,
    #[arg(short = 'u', long, value_name = "AGENT", help = "User agent sent with every request")]
    pub user_agent: Option<String>,
    #[arg(short = 'i', long, value_name = "URLLIST", help = "Read image URLs from a file instead of the page")]
    pub input_url: Option<PathBuf>,
    #[arg(short = 's', long, visible_alias = "log", help = "Write the image log (images.yaml)")]
    pub sombrero: bool,
    #[arg(short = 'D', long, help = "Print image URLs instead of downloading them")]
    pub dump: bool,
    #[arg(short = 'H', long, help = "Print the page HTML and exit")]
    pub html_dump: bool,
    #[arg(short = 'n', long, help = "Record images without downloading them")]
    pub no_download: bool,
    #[arg(long, help = "Keep log entries for images that failed to download")]
    pub keep_failed: bool,
    #[arg(long, value_name = "PATH", help = "Settings file (default: getimg.toml)")]
    pub config: Option<PathBuf>,
}
