use clap::Parser;
use fellowship_assign::app::form::SUBMITTING_LABEL;
use fellowship_assign::app::page::render_notice;
use fellowship_assign::core::AssignmentService;
use fellowship_assign::utils::error::ErrorSeverity;
use fellowship_assign::utils::{logger, validation::Validate};
use fellowship_assign::{AssignError, CliConfig, FellowshipForm, Page, Result};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type StdinLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_logger(cli.log_format, cli.verbose);

    tracing::info!("Starting fellowship-assign");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ fellowship-assign failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let config = cli.load_app_config()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded, service endpoint: {}", config.service.endpoint);

    let page = Page::from_config(&config.page);
    let form = FellowshipForm::from_config(&config)?;

    match cli.registration_args() {
        Some((name, phone)) => submit_once(&form, &page, name, phone).await,
        None => run_interactive(&form, &page).await,
    }
}

async fn submit_once<S: AssignmentService>(
    form: &FellowshipForm<S>,
    page: &Page,
    name: &str,
    phone: &str,
) -> Result<()> {
    form.set_name(name);
    form.set_phone(phone);

    println!("{}", SUBMITTING_LABEL);
    let submitted = form.submit().await;
    print_notice(form);
    submitted?;

    print!("{}", page.render(&form.view()));
    Ok(())
}

async fn run_interactive<S: AssignmentService>(
    form: &FellowshipForm<S>,
    page: &Page,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", page.render(&form.view()));
        println!();

        let Some(name) = prompt(&mut lines, "Full Name: ").await? else {
            return Ok(());
        };
        form.set_name(name);

        let Some(phone) = prompt(&mut lines, "Phone Number: ").await? else {
            return Ok(());
        };
        form.set_phone(phone);

        println!("{}", SUBMITTING_LABEL);
        match form.submit().await {
            Ok(resolution) => {
                tracing::debug!("Resolution: {:?}", resolution);
                print_notice(form);
                println!();
                print!("{}", page.render(&form.view()));
            }
            Err(AssignError::ValidationError { .. } | AssignError::AssignmentFailed { .. }) => {
                // Fields stay as typed; the member simply tries again.
                print_notice(form);
                continue;
            }
            Err(e) => return Err(e),
        }

        let again = prompt(&mut lines, "Submit another registration? [y/N]: ").await?;
        match again.as_deref().map(str::trim) {
            Some("y") | Some("Y") | Some("yes") => form.reset(),
            _ => return Ok(()),
        }
    }
}

async fn prompt(lines: &mut StdinLines, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

fn print_notice<S: AssignmentService>(form: &FellowshipForm<S>) {
    if let Some(notice) = form.state().last_notice {
        println!("{}", render_notice(&notice));
    }
}
