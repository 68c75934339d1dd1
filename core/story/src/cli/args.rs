use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

/// 1文字あたりの既定表示間隔（ミリ秒）
const DEFAULT_SPEED_MS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -m / --model: 静的候補リストの先頭に挿入するモデル名
    pub model: Option<String>,
    /// --no-type: タイプライター演出を止めて一括表示する
    pub no_type: bool,
    /// --speed: 1文字あたりの表示間隔（ミリ秒）
    pub speed_ms: u64,
    /// テーマ（複数語は空白で結合して1テーマとして扱う）
    pub theme_args: Vec<String>,
}

/// 解析結果: 通常のConfig / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("story")
        .about("Generate a short story from a theme")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Try this model first, before the built-in candidate list")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("no-type")
                .long("no-type")
                .help("Print the story at once instead of the typewriter reveal")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("speed")
                .long("speed")
                .value_name("ms")
                .help("Typewriter interval per character in milliseconds")
                .value_parser(value_parser!(u64))
                .default_value("30")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script (bash, zsh, fish)")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("theme")
                .value_name("theme")
                .help("Theme words for the story")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

/// プロセス引数を解析する
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args().skip(1))
}

/// 引数列を解析する（テストから直接呼べるようにprocess非依存）
pub fn parse_args_from<I>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = String>,
{
    let matches = build_clap_command()
        .no_binary_name(true)
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(*shell));
    }

    let config = Config {
        help: matches.get_flag("help"),
        model: matches.get_one::<String>("model").cloned(),
        no_type: matches.get_flag("no-type"),
        speed_ms: matches
            .get_one::<u64>("speed")
            .copied()
            .unwrap_or(DEFAULT_SPEED_MS),
        theme_args: matches
            .get_many::<String>("theme")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
    };
    Ok(ParseOutcome::Config(config))
}

/// 補完スクリプトを標準出力に書く
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "story", &mut std::io::stdout());
}

pub fn print_help() {
    println!("Usage: story [options] <theme...>");
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  -m, --model <model>    Try this model first, before the built-in candidate list");
    println!("  --no-type              Print the story at once instead of the typewriter reveal");
    println!("  --speed <ms>           Typewriter interval per character (default: 30)");
    println!("  --generate <shell>     Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY   API key for the generation endpoint (required)");
    println!("  STORY_API_BASE   Override the endpoint base URL");
    println!("  STORY_HOME       Directory for the JSONL log file");
    println!();
    println!("Description:");
    println!("  Generate a short story (title + opening) from a theme and print it");
    println!("  with a typewriter reveal. A few special themes return fixed stories");
    println!("  without calling the network.");
    println!();
    println!("Examples:");
    println!("  story 雨");
    println!("  story --no-type midnight glass");
    println!("  story -m gemini-2.0-flash 夜明け");
}
