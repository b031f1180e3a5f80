use crate::chat_loop::{ChatLoop, LineInput, QueryInput, TerminalInput};
use application::answer_service::AnswerGenerator;
use application::ingest_service::IngestionPipeline;
use application::rag_service::RagService;
use application::retrieval_service::Retriever;
use clap::{Parser, Subcommand};
use colored::Colorize;
use domain::ports::{Embedder, LlmClient, VectorStore};
use infrastructure::config::Config;
use infrastructure::embedder::E5Embedder;
use infrastructure::embedding_storage::ParagraphStore;
use infrastructure::gemini_client::GeminiClient;
use shared::types::Result;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

/// Ask questions about farming documents, answered by Gemini from the most
/// relevant stored paragraphs.
#[derive(Parser, Debug)]
#[command(name = "agri_rag")]
#[command(about = "Paragraph retrieval and question answering over farming documents", long_about = None)]
pub struct Cli {
    /// Number of paragraphs to retrieve per question
    #[arg(long, global = true)]
    pub top_k: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Interactive question loop; type `exit` to quit (default)
    Chat,
    /// Split, embed and store a UTF-8 text document
    Ingest {
        /// Path of the document to ingest
        file: PathBuf,
    },
    /// Answer a single question and exit
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },
    /// Show how many paragraphs are stored
    Stats,
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new() -> Self {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        if let Some(k) = cli.top_k {
            self.config.top_k = k;
        }

        match cli.command.unwrap_or(Command::Chat) {
            Command::Chat => self.run_chat().await,
            Command::Ingest { file } => self.run_ingest(file),
            Command::Ask { question } => self.run_ask(&question.join(" ")).await,
            Command::Stats => self.run_stats(),
        }
    }

    fn open_store(&self) -> Result<Arc<dyn VectorStore>> {
        Ok(Arc::new(ParagraphStore::open(&self.config.db_path)?))
    }

    fn load_embedder(&self) -> Result<Arc<dyn Embedder>> {
        eprintln!("{}", "Loading embedding model...".cyan());
        Ok(Arc::new(E5Embedder::load(
            &self.config.model_dir,
            self.config.max_tokens,
        )?))
    }

    fn build_rag(&self) -> Result<RagService> {
        let embedder = self.load_embedder()?;
        let store = self.open_store()?;
        let llm: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(&self.config)?);
        Ok(RagService::new(
            Retriever::new(embedder, store),
            AnswerGenerator::new(llm),
            self.config.top_k,
        ))
    }

    fn run_ingest(&self, file: PathBuf) -> Result<()> {
        let pipeline = IngestionPipeline::new(self.load_embedder()?, self.open_store()?);
        let report = pipeline.ingest_file(&file)?;
        println!(
            "{} {} paragraphs from {}",
            "Inserted".green().bold(),
            report.inserted,
            report.source.display()
        );
        Ok(())
    }

    async fn run_ask(&self, question: &str) -> Result<()> {
        let rag = self.build_rag()?;
        let answer = rag.query(question).await?;
        println!("{} {}", "Response:".green().bold(), answer);
        Ok(())
    }

    async fn run_chat(&self) -> Result<()> {
        let rag = self.build_rag()?;
        let mut input: Box<dyn QueryInput> = if io::stdin().is_terminal() {
            Box::new(TerminalInput)
        } else {
            Box::new(LineInput::new(io::stdin().lock()))
        };
        let mut stdout = io::stdout();
        ChatLoop::new(&rag).run(input.as_mut(), &mut stdout).await?;
        Ok(())
    }

    fn run_stats(&self) -> Result<()> {
        let store = self.open_store()?;
        println!(
            "{} {}",
            "Stored paragraphs:".green().bold(),
            store.count()?
        );
        Ok(())
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
