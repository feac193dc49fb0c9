use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use nlp_core::wordlist::{load_lexicon, load_stop_words};
use nlp_core::{
    Conversation, FrequencyContext, LexiconSegmenter, Message, MessageAnalysisContext,
    MessageAnalyzer, NlpEngine, Segmenter, WhitespaceSegmenter,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nlp_util", version, about = "Keyword scoring and conversation merging for chat logs")]
struct Cli {
    /// Stop-word list, one word per line. May be repeated.
    #[arg(long = "stop-words", global = true)]
    stop_words: Vec<PathBuf>,

    /// Dictionary for the lexicon segmenter, one word per line. May be repeated.
    #[arg(long, global = true)]
    lexicon: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = SegmenterKind::Lexicon, global = true)]
    segmenter: SegmenterKind,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum SegmenterKind {
    Lexicon,
    Whitespace,
}

#[derive(Subcommand)]
enum Command {
    /// Segment texts (JSON array of strings) into tokens.
    Segment { input: PathBuf },
    /// Check whether a word is a stop word.
    StopWord { word: String },
    /// Drop stop words from a JSON array of tokens.
    RemoveStopWords { input: PathBuf },
    /// Rank the words of a JSON array of texts by count.
    Count {
        input: PathBuf,
        #[arg(long)]
        include_stop_words: bool,
        /// Negative means unlimited.
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Build a frequency context from a JSON object of word -> count.
    Context { input: PathBuf },
    /// Score a JSON array of words against a frequency context.
    Keywords {
        input: PathBuf,
        #[arg(long)]
        context: Option<PathBuf>,
        /// Zero or negative means unlimited.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Group a JSON request {messages, context} into keyword-labelled conversations.
    Conversations {
        input: PathBuf,
        /// Print a colored summary instead of JSON.
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Deserialize)]
struct ConversationsRequest {
    messages: Vec<Message>,
    context: MessageAnalysisContext,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let engine = build_engine(&cli)?;

    match &cli.command {
        Command::Segment { input } => {
            let texts: Vec<String> = read_json(input)?;
            write_json(&engine.segment_texts(&texts))
        }
        Command::StopWord { word } => write_json(&engine.is_stop_word(word)),
        Command::RemoveStopWords { input } => {
            let words: Vec<String> = read_json(input)?;
            write_json(&engine.remove_stop_words(&words))
        }
        Command::Count { input, include_stop_words, limit } => {
            let texts: Vec<String> = read_json(input)?;
            write_json(&engine.count_words(&texts, *include_stop_words, *limit))
        }
        Command::Context { input } => {
            let counts: HashMap<String, u64> = read_json(input)?;
            let context = engine
                .generate_context(&counts)
                .context("Could not build frequency context")?;
            write_json(&context)
        }
        Command::Keywords { input, context, limit } => {
            let words: Vec<String> = read_json(input)?;
            let context = match context {
                Some(path) => read_json(path)?,
                None => FrequencyContext::empty(),
            };
            write_json(&engine.keyword_info(&words, &context, *limit))
        }
        Command::Conversations { input, pretty } => {
            let request: ConversationsRequest = read_json(input)?;
            let conversations = MessageAnalyzer::new(&engine)
                .merge_messages_and_compute_keywords(&request.messages, &request.context)
                .context("Conversation analysis failed")?;
            if *pretty {
                print_conversations(&conversations)
            } else {
                write_json(&conversations)
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_engine(cli: &Cli) -> Result<NlpEngine> {
    let stop_words = load_stop_words(&cli.stop_words).context("Failed to load stop words")?;
    let segmenter: Box<dyn Segmenter> = match cli.segmenter {
        SegmenterKind::Lexicon => {
            let lexicon = load_lexicon(&cli.lexicon).context("Failed to load lexicon")?;
            let segmenter = LexiconSegmenter::new(lexicon);
            debug!("Lexicon segmenter ready with {} entries", segmenter.lexicon_size());
            Box::new(segmenter)
        }
        SegmenterKind::Whitespace => Box::new(WhitespaceSegmenter),
    };
    Ok(NlpEngine::with_stop_words(segmenter, stop_words))
}

/// `-` reads from stdin.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return serde_json::from_str(&buffer).context("Invalid JSON on stdin");
    }
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn print_conversations(conversations: &[Conversation]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if conversations.is_empty() {
        writeln!(stdout, "{}", "No conversations found.".dark_grey())?;
        return Ok(());
    }
    for (i, conversation) in conversations.iter().enumerate() {
        writeln!(
            stdout,
            "{} {}..{}  {} messages, {} words ({} non-stop)",
            format!("#{}", i + 1).bold().cyan(),
            conversation.start_timestamp_seconds,
            conversation.end_timestamp_seconds,
            conversation.message_count(),
            conversation.num_words,
            conversation.num_non_stop_words,
        )?;
        let keywords: Vec<String> = conversation
            .keywords
            .iter()
            .map(|k| format!("{} ({:.2})", k.word, k.score))
            .collect();
        writeln!(stdout, "   {} {}", "keywords:".yellow(), keywords.join(", "))?;
        for message in &conversation.messages {
            writeln!(
                stdout,
                "   {} {} -> {}: {}",
                message.timestamp_seconds.to_string().dark_grey(),
                message.from_user_id.as_str().green(),
                message.to_user_id,
                message.content
            )?;
        }
    }
    stdout.flush()?;
    Ok(())
}
