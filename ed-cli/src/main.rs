// Command-line interface for edconv
//
// This binary converts lesson content between Markdown and the Ed platform's XML document format.
//
// Usage:
//  edconv render-ed <file.md> [--offline] [-o <file>]                    - Markdown to Ed-XML, uploading images
//  edconv render-md <file.xml> [--assets <dir>] [--no-download] [-o <file>] - Ed-XML to Markdown, downloading images
//  edconv inspect <file.xml>                                             - Print the Ed document tree
//
// Uploading images needs an API token, read from the environment variable named by
// `api.token_env` (EDSTEM_TOKEN by default). Downloads are plain GETs and need none.

use clap::{Arg, ArgAction, Command, ValueHint};
use ed_babel::assets::{AssetStore, HttpAssetStore, MemoryAssetStore};
use ed_babel::transforms::{ed_to_markdown, ed_to_tree, markdown_to_ed};
use ed_config::{EdConfig, Loader, PROJECT_CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("edconv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert lesson content between Markdown and Ed-XML")
        .long_about(
            "edconv converts documents between Markdown and the XML format used by the Ed \
            learning platform.\n\n\
            Commands:\n  \
            - render-ed: Markdown to Ed-XML (local images are uploaded)\n  \
            - render-md: Ed-XML to Markdown (images are downloaded)\n  \
            - inspect:   Show the parsed Ed document as a tree\n\n\
            Examples:\n  \
            edconv render-ed lesson.md                       # Ed-XML on stdout\n  \
            edconv render-ed lesson.md --offline             # Skip uploads\n  \
            edconv render-md slide.xml --assets img -o s.md  # Images into ./img\n  \
            edconv inspect slide.xml                         # Tree view",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an edconv.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log output (-v for debug, -vv for trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("render-ed")
                .about("Convert a Markdown file to Ed-XML")
                .long_about(
                    "Convert a Markdown file to Ed-XML.\n\n\
                    Images with a local path are resolved relative to the input file, uploaded \
                    to the platform and replaced by their static URL. Remote images are kept.\n\n\
                    With --offline nothing is uploaded and local images get placeholder ids.",
                )
                .arg(input_arg("Markdown file to convert"))
                .arg(output_arg())
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .help("Do not upload images")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render-md")
                .about("Convert an Ed-XML file to Markdown")
                .long_about(
                    "Convert an Ed-XML file to Markdown.\n\n\
                    Each image is downloaded into the assets directory as image0.png, image1.png \
                    and so on, and linked relative to the output file. With --no-download images \
                    are left out.",
                )
                .arg(input_arg("Ed-XML file to convert"))
                .arg(output_arg())
                .arg(
                    Arg::new("assets")
                        .long("assets")
                        .value_name("DIR")
                        .help("Directory to download images into (default: current directory)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("no-download")
                        .long("no-download")
                        .help("Leave images out instead of downloading them")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the Ed document tree of an Ed-XML file")
                .arg(input_arg("Ed-XML file to inspect")),
        )
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("Write the result to FILE instead of stdout")
        .value_hint(ValueHint::FilePath)
}

fn main() {
    let matches = build_cli().get_matches();

    init_logging(matches.get_count("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("render-ed", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let offline = sub_matches.get_flag("offline");
            handle_render_ed_command(input, output, offline, &config);
        }
        Some(("render-md", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let assets = sub_matches
                .get_one::<String>("assets")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            apply_render_overrides(&mut config, sub_matches.get_flag("no-download"));
            handle_render_md_command(input, output, assets, &config);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_inspect_command(input);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the render-ed command
fn handle_render_ed_command(input: &str, output: Option<&str>, offline: bool, config: &EdConfig) {
    let source = read_input(input);
    let options = config.markdown_to_ed_options(base_dir_of(input));

    let result = if offline {
        markdown_to_ed(&source, &options, &MemoryAssetStore::new())
    } else {
        let store = http_store(config);
        markdown_to_ed(&source, &options, &store)
    };

    let ed = result.unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });
    write_output(output, &ed);
}

/// Handle the render-md command
fn handle_render_md_command(input: &str, output: Option<&str>, assets: PathBuf, config: &EdConfig) {
    let source = read_input(input);
    let mut options = config.ed_to_markdown_options(assets);
    options.document_dir = Some(document_dir_of(output));

    let result = if options.download_images {
        fs::create_dir_all(&options.asset_folder).unwrap_or_else(|e| {
            eprintln!(
                "Error creating assets directory '{}': {e}",
                options.asset_folder.display()
            );
            std::process::exit(1);
        });
        let store = download_store(config);
        ed_to_markdown(&source, &options, &store)
    } else {
        ed_to_markdown(&source, &options, &MemoryAssetStore::new())
    };

    let markdown = result.unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });
    write_output(output, &markdown);
}

/// Handle the inspect command
fn handle_inspect_command(input: &str) {
    let source = read_input(input);
    let tree = ed_to_tree(&source).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    print!("{tree}");
}

fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_cli_config(explicit_path: Option<&str>) -> EdConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_render_overrides(config: &mut EdConfig, no_download: bool) {
    if no_download {
        config.render.download_images = false;
    }
}

/// Directory that relative image paths in `input` resolve against.
fn base_dir_of(input: &str) -> Option<PathBuf> {
    Path::new(input)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Directory the Markdown lands in, which image links are made relative to.
fn document_dir_of(output: Option<&str>) -> PathBuf {
    output
        .and_then(|path| Path::new(path).parent())
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn api_token(config: &EdConfig) -> Result<String, String> {
    match std::env::var(&config.api.token_env) {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(format!(
            "Please provide the {} environment variable",
            config.api.token_env
        )),
    }
}

fn http_store(config: &EdConfig) -> impl AssetStore {
    let token = api_token(config).unwrap_or_else(|msg| {
        eprintln!("{msg}");
        std::process::exit(1);
    });
    debug!(api = %config.api.base_url, "using platform asset store");
    HttpAssetStore::with_urls(
        token,
        config.api.base_url.clone(),
        config.assets.static_base_url.clone(),
        config.api.timeout(),
    )
    .unwrap_or_else(|e| {
        eprintln!("Error creating HTTP client: {e}");
        std::process::exit(1);
    })
}

fn download_store(config: &EdConfig) -> impl AssetStore {
    HttpAssetStore::for_downloads(config.assets.static_base_url.clone(), config.api.timeout())
        .unwrap_or_else(|e| {
            eprintln!("Error creating HTTP client: {e}");
            std::process::exit(1);
        })
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, text: &str) {
    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n")).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{text}"),
    }
}
