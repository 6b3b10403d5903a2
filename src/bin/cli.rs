//! QuizSense CLI
//!
//! Command-line front end for the QuizSense backend:
//! - Sign up, sign in and out
//! - Generate, take and submit quizzes
//! - Read history and reports

use clap::{Parser, Subcommand};
use quizsense::api::{DEFAULT_DAYS, DEFAULT_HISTORY_LIMIT, DEFAULT_REPORT_LIMIT};
use quizsense::{
    display_name, format_date, format_time, performance_class, ApiError, Config, Difficulty,
    FileStore, LoggingConfig, LogoutOutcome, Quiz, QuizClient, QuizResult, Session, SingleAnswer,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "quizsense")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Take AI-generated quizzes and track your progress")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: from config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (default: from config)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign in
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign out (clears the local session)
    Logout,

    /// Show the profile from the server
    Me,

    /// Show the locally stored user
    Whoami,

    /// Check whether today's quiz is available
    CanTake,

    /// Generate and submit quizzes
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Recent quiz results
    History {
        #[arg(short, long, default_value_t = DEFAULT_DAYS)]
        days: u32,
        #[arg(short, long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },

    /// List available topics
    Topics {
        /// Only topics of this subject
        subject: Option<String>,
    },

    /// Performance reports
    #[command(subcommand)]
    Report(ReportCommand),

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum QuizCommand {
    /// Quiz on a chosen subject and topic
    Generate {
        subject: String,
        topic: String,
        /// easy, medium or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,
        #[arg(short, long, default_value_t = 5)]
        num_questions: u32,
    },

    /// Quiz with topics picked from your weak areas
    Auto {
        domain: String,
        #[arg(short, long, default_value_t = 5)]
        num_questions: u32,
    },

    /// Submit answers
    Submit {
        quiz_id: String,
        /// Answers in q_id=option format, e.g. q1=B
        #[arg(short, long = "answer")]
        answers: Vec<String>,
        /// Total time taken in seconds
        #[arg(short, long, default_value_t = 0)]
        time: u32,
    },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// This week's AI report
    Weekly,
    /// Accuracy over a period
    Performance {
        #[arg(short, long, default_value_t = DEFAULT_DAYS)]
        days: u32,
    },
    /// Dashboard summary
    Dashboard,
    /// Topics that need work
    Weak,
    /// Past weekly reports
    History {
        #[arg(short, long, default_value_t = DEFAULT_REPORT_LIMIT)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load_default();

    init_logging(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = quizsense::config::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let session_path = cli
        .session_file
        .unwrap_or_else(|| PathBuf::from(&config.session.path));
    tracing::debug!("Session file: {:?}", session_path);

    let session = Session::new(Arc::new(FileStore::new(session_path)));
    let client = QuizClient::new(config.api.client_config(), session)?;
    let json = cli.format == "json";

    if let Err(e) = run(&client, cli.command, json).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

impl Commands {
    /// Whether the command calls a bearer-protected endpoint
    fn requires_session(&self) -> bool {
        matches!(
            self,
            Commands::Me
                | Commands::CanTake
                | Commands::Quiz(_)
                | Commands::History { .. }
                | Commands::Topics { .. }
                | Commands::Report(_)
        )
    }
}

async fn run(client: &QuizClient, command: Commands, json: bool) -> Result<(), ApiError> {
    if command.requires_session() {
        require_session(client);
    }

    match command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let auth = client.register(&name, &email, &password).await?;
            println!("Welcome, {}!", display_name(Some(&auth.user)));
        }

        Commands::Login { email, password } => {
            let auth = client.login(&email, &password).await?;
            println!("Signed in as {}", display_name(Some(&auth.user)));
        }

        Commands::Logout => {
            if let LogoutOutcome::Unreachable(reason) = client.server_logout().await {
                eprintln!("Server not reachable ({}); signing out locally", reason);
            }
            client.session().clear()?;
            println!("Signed out");
        }

        Commands::Me => {
            let user = client.me().await?;
            if json {
                print_json(&serde_json::to_value(&user)?);
            } else {
                println!("{} <{}>", user.name, user.email);
                if let Some(created) = &user.created_at {
                    println!("Member since:  {}", format_date(created));
                }
                println!("Quizzes taken: {}", user.total_quizzes);
                println!("Streak:        {} days", user.current_streak);
            }
        }

        Commands::Whoami => match client.session().try_current_user() {
            Ok(Some(user)) if json => print_json(&user),
            Ok(Some(user)) => println!("{}", display_name(Some(&user))),
            Ok(None) => println!("Not signed in"),
            Err(e) => {
                eprintln!("Stored session is unreadable: {}", e);
                std::process::exit(1);
            }
        },

        Commands::CanTake => {
            let status = client.can_take_quiz().await?;
            if json {
                print_json(&serde_json::to_value(&status)?);
            } else {
                println!("{}", status.message);
                if let Some(next) = status.next_quiz_available.filter(|_| !status.can_take_quiz) {
                    println!("Next quiz available: {}", next);
                }
            }
        }

        Commands::Quiz(cmd) => {
            run_quiz(client, cmd, json).await?;
        }

        Commands::History { days, limit } => {
            let history = client.quiz_history(days, limit).await?;
            if json {
                print_json(&history);
            } else {
                print_history(&history);
            }
        }

        Commands::Topics { subject } => {
            let topics = client.topics(subject.as_deref()).await?;
            if json {
                print_json(&topics);
            } else {
                print_topics(&topics);
            }
        }

        Commands::Report(cmd) => {
            let report = match cmd {
                ReportCommand::Weekly => client.weekly_report().await?,
                ReportCommand::Performance { days } => client.performance(days).await?,
                ReportCommand::Dashboard => client.dashboard().await?,
                ReportCommand::Weak => client.weak_topics().await?,
                ReportCommand::History { limit } => client.report_history(limit).await?,
            };
            if json {
                print_json(&report);
            } else {
                print_fields(&report);
            }
        }

        Commands::Config { .. } => unreachable!("handled before the client is built"),
    }

    Ok(())
}

async fn run_quiz(client: &QuizClient, cmd: QuizCommand, json: bool) -> Result<(), ApiError> {
    match cmd {
        QuizCommand::Generate {
            subject,
            topic,
            difficulty,
            num_questions,
        } => {
            let quiz = client
                .generate_quiz(&subject, &topic, difficulty, num_questions)
                .await?;
            if json {
                print_json(&serde_json::to_value(&quiz)?);
            } else {
                print_quiz(&quiz);
            }
        }

        QuizCommand::Auto {
            domain,
            num_questions,
        } => {
            let quiz = client.generate_auto_quiz(&domain, num_questions).await?;
            if json {
                print_json(&serde_json::to_value(&quiz)?);
            } else {
                print_quiz(&quiz);
            }
        }

        QuizCommand::Submit {
            quiz_id,
            answers,
            time,
        } => {
            let mut parsed = Vec::new();
            for answer in answers {
                match answer.split_once('=') {
                    Some((q_id, option)) => parsed.push(SingleAnswer::new(q_id, option)),
                    None => {
                        eprintln!("Invalid answer format: {} (expected q_id=option)", answer);
                        std::process::exit(1);
                    }
                }
            }

            let result = client.submit_quiz(&quiz_id, &parsed, time).await?;
            if json {
                print_json(&serde_json::to_value(&result)?);
            } else {
                print_result(&result);
            }
        }
    }

    Ok(())
}

fn require_session(client: &QuizClient) {
    if !client.session().has_token() {
        eprintln!("Not signed in. Run `quizsense login <email> -p <password>` first.");
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quizsense={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{}", value),
    }
}

fn print_quiz(quiz: &Quiz) {
    println!(
        "Quiz {}: {} / {} ({}, {} questions, {} min)",
        quiz.quiz_id,
        quiz.subject,
        quiz.topic,
        quiz.difficulty,
        quiz.total_questions,
        quiz.time_limit_minutes
    );

    for (i, q) in quiz.questions.iter().enumerate() {
        println!();
        println!("{}. [{}] {}", i + 1, q.q_id, q.question);
        for (key, text) in &q.options {
            println!("   {}) {}", key, text);
        }
    }
}

fn print_result(result: &QuizResult) {
    println!(
        "Score: {}/{} ({:.1}%, {}) in {}",
        result.score,
        result.total,
        result.percentage,
        performance_class(result.percentage),
        format_time(i64::from(result.time_taken_seconds))
    );

    for r in &result.results {
        let mark = if r.is_correct { "+" } else { "-" };
        println!(
            " {} [{}] {} (you: {}, correct: {})",
            mark, r.q_id, r.topic, r.selected_option, r.correct_option
        );
    }

    if !result.topic_breakdown.is_empty() {
        println!();
        println!("By topic:");
        for (topic, counts) in &result.topic_breakdown {
            println!(
                "  {:<30} {}/{}",
                topic,
                counts.get("correct").copied().unwrap_or(0),
                counts.get("total").copied().unwrap_or(0)
            );
        }
    }
}

fn print_history(history: &Value) {
    let quizzes = history["quizzes"].as_array().cloned().unwrap_or_default();
    if quizzes.is_empty() {
        println!("No quizzes in this period");
        return;
    }

    println!("{:<14} {:<30} {:>8}  {}", "Date", "Topic", "Score", "Level");
    println!("{}", "-".repeat(64));
    for quiz in &quizzes {
        let percentage = quiz["percentage"].as_f64().unwrap_or(0.0);
        println!(
            "{:<14} {:<30} {:>7.1}%  {}",
            format_date(quiz["completed_at"].as_str().unwrap_or("")),
            quiz["topic"].as_str().unwrap_or("-"),
            percentage,
            performance_class(percentage)
        );
    }
}

fn print_topics(topics: &Value) {
    if let Some(list) = topics["topics"].as_array() {
        for topic in list {
            println!("{}", topic.as_str().unwrap_or_default());
        }
        return;
    }

    if let Some(by_subject) = topics["topics_by_subject"].as_object() {
        for (subject, list) in by_subject {
            println!("{}", subject);
            for topic in list.as_array().into_iter().flatten() {
                println!("  - {}", topic.as_str().unwrap_or_default());
            }
        }
        return;
    }

    print_fields(topics);
}

fn print_fields(value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                match v {
                    Value::String(s) => println!("{}: {}", key, s),
                    Value::Null => println!("{}: -", key),
                    other => println!("{}: {}", key, other),
                }
            }
        }
        Value::Null => println!("(no data)"),
        other => print_json(other),
    }
}
