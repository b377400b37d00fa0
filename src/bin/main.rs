use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use mathsolver_rs::logger::LOGGER;
use mathsolver_rs::solver::{Solver, SolverConfig, PROMPT_FOR_QUESTION};
use std::fs::File;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Groq API key; falls back to the GROQ_API_KEY environment variable
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Model ID to request from the provider
    #[arg(long, default_value = "gemma2-9b-it")]
    model_id: String,

    /// Base URL for the chat-completions API
    #[arg(short, long)]
    base_url: Option<String>,

    /// Step budget for the agent's reason-then-act loop
    #[arg(long, default_value_t = 10)]
    max_steps: usize,

    /// File the step logs are dumped to after each question
    #[arg(long, default_value = "logs.txt")]
    log_file: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = SolverConfig {
        api_key: args.api_key,
        model_id: Some(args.model_id),
        base_url: args.base_url,
        temperature: None,
        max_steps: Some(args.max_steps),
    };
    let mut solver = match Solver::from_config(config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e.message().red().bold());
            std::process::exit(2);
        }
    };

    let mut file = File::create(&args.log_file)?;

    loop {
        print!("{}", "Question: ".yellow().bold());
        io::stdout().flush()?;

        let mut question = String::new();
        if io::stdin().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();

        if question == "exit" {
            break;
        }
        if question.is_empty() {
            println!("{}", PROMPT_FOR_QUESTION);
            continue;
        }

        let report = solver.answer(question);
        println!("\n{}\n", report.body().green());

        for log in solver.logs_mut() {
            serde_json::to_writer_pretty(&mut file, &log)?;
        }
    }
    Ok(())
}
