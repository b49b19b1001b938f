use clap::Parser;
use webchat_runner::browser::prompt;
use webchat_runner::{await_response, resolve_ws_url, Assistant, ChromeDriver, RunnerError};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ask a web chat assistant a question through an already-running browser"
)]
struct Args {
    /// Remote debugging endpoint (ws:// websocket or http:// DevTools base)
    #[arg(long, env = "CDP_URL", default_value = webchat_runner::DEFAULT_ENDPOINT)]
    cdp_url: String,

    /// Prompt text; the first word may name the assistant (gemini, chatgpt, claude)
    #[arg(required = true, num_args = 1..)]
    words: Vec<String>,
}

/// Split the positional words into the assistant selection and prompt text.
/// The first word selects an assistant only when it names one; anything else
/// is prompt text, so quoting the prompt is optional.
fn split_words(words: &[String]) -> (Assistant, String) {
    match words.split_first() {
        Some((first, rest)) => match Assistant::from_name(first) {
            Some(assistant) => (assistant, rest.join(" ")),
            None => (Assistant::default(), words.join(" ")),
        },
        None => (Assistant::default(), String::new()),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let code = tokio::select! {
        result = run(&args) => match result {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {}", e);
                e.exit_code()
            }
        },
        _ = tokio::signal::ctrl_c() => 130,
    };
    std::process::exit(code);
}

async fn run(args: &Args) -> Result<(), RunnerError> {
    let (assistant, prompt_text) = split_words(&args.words);
    let site = assistant.descriptor();
    log::info!("Asking {} via {}", assistant.name(), args.cdp_url);

    let ws_url = resolve_ws_url(&args.cdp_url).await?;
    let driver = ChromeDriver::connect(&ws_url).await?;
    let page = driver.open(site.url).await?;

    prompt::submit_prompt(&page, site.input_selectors, &prompt_text).await?;
    let answer = await_response(&page, site.response_selectors).await?;
    println!("{}", answer);

    // The window grabbed focus while we drove it; tuck it away now that the
    // answer is printed. A no-op on targets without window bounds support.
    if let Err(e) = driver.minimize_window().await {
        log::debug!("Window minimize skipped: {}", e);
    }

    Ok(())
}
