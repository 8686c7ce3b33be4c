use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use referral_partners::config::AppConfig;
use referral_partners::error::AppError;
use referral_partners::telemetry;
use referral_partners::workflows::partners::export::{export_crm, export_scores, export_sla};
use referral_partners::workflows::partners::fixtures::{sample_contacts, sample_practices};
use referral_partners::workflows::partners::report::crm::{
    CrmRecordDetail, CrmTable, OwnerWorkload,
};
use referral_partners::workflows::partners::report::{
    build_pipeline_summary, HooksReport, PriorityReport, SlaTrackerReport, TierSummary,
};
use referral_partners::workflows::partners::{
    build_crm_records, build_sla_records, import_practices_from_path, render_score_chart,
    ChartOutcome, ScoredPractice, ScoringEngine, StaticContactDirectory, CRM_CSV, SCORES_CSV,
    SCORES_PNG, SLA_CSV,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "partner-pipeline",
    about = "Score, tier and track follow-up SLAs for behavioral health referral partners",
    version
)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Practice list CSV (defaults to the built-in sample practices)
    #[arg(long, global = true)]
    practices: Option<PathBuf>,
    /// Contact log CSV with owner and last contact date per practice
    #[arg(long, global = true)]
    contacts: Option<PathBuf>,
    /// Date that days-since-contact is measured from (defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// Directory for CSV and chart output (overrides APP_OUTPUT_DIR)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ranked scoring report, tier summary, score CSV and chart
    Scores(ScoresArgs),
    /// Follow-up SLA tracker and CSV
    Sla,
    /// CRM account table, owner workload, record detail and CSV
    Crm,
    /// Personalized outreach hooks for Tier 1 practices
    Hooks,
    /// One-page pipeline summary
    Pipeline(PipelineArgs),
    /// Every report in sequence (default command)
    All,
}

#[derive(Args, Debug, Default)]
struct ScoresArgs {
    /// Skip the PNG score chart
    #[arg(long)]
    no_chart: bool,
}

#[derive(Args, Debug, Default)]
struct PipelineArgs {
    /// Emit the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load_with_output_dir(cli.input.out_dir.clone())?;

    telemetry::init(&config.telemetry)?;

    let run = PartnerRun::prepare(config, &cli.input)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run.execute(cli.command.unwrap_or(Command::All), &mut out)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Scored practices and contact history shared by every report.
struct PartnerRun {
    config: AppConfig,
    engine: ScoringEngine,
    scored: Vec<ScoredPractice>,
    contacts: StaticContactDirectory,
}

impl PartnerRun {
    fn prepare(config: AppConfig, input: &InputArgs) -> Result<Self, AppError> {
        let as_of = input
            .as_of
            .unwrap_or_else(|| Local::now().date_naive());

        let practices = match &input.practices {
            Some(path) => import_practices_from_path(path)?,
            None => sample_practices(),
        };
        let contacts = match &input.contacts {
            Some(path) => StaticContactDirectory::from_path(path, as_of)?,
            None => sample_contacts(),
        };

        let engine = ScoringEngine::default();
        let scored = engine.evaluate_all(&practices);
        info!(
            environment = ?config.environment,
            practices = scored.len(),
            contacts = contacts.len(),
            %as_of,
            "prepared partner run"
        );

        Ok(Self {
            config,
            engine,
            scored,
            contacts,
        })
    }

    fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<(), AppError> {
        match command {
            Command::Scores(args) => self.scores(&args, out),
            Command::Sla => self.sla(out),
            Command::Crm => self.crm(out),
            Command::Hooks => self.hooks(out),
            Command::Pipeline(args) => self.pipeline(&args, out),
            Command::All => {
                self.scores(&ScoresArgs::default(), out)?;
                self.sla(out)?;
                self.crm(out)?;
                self.hooks(out)?;
                self.pipeline(&PipelineArgs::default(), out)
            }
        }
    }

    fn scores<W: Write>(&self, args: &ScoresArgs, out: &mut W) -> Result<(), AppError> {
        write!(out, "{}", PriorityReport::new(&self.scored, self.engine.config()))?;
        write!(out, "{}", TierSummary::new(&self.scored))?;

        if self.config.output.render_chart && !args.no_chart {
            let path = self.config.output.path_for(SCORES_PNG);
            match render_score_chart(&self.scored, &path)? {
                ChartOutcome::Written { path, .. } => {
                    writeln!(out, "  Bar chart saved to: {}", path.display())?
                }
                ChartOutcome::Unavailable => writeln!(
                    out,
                    "  (chart support not compiled in - skip bar chart. \
                     Rebuild with --features chart)"
                )?,
            }
        }

        let path = self.config.output.path_for(SCORES_CSV);
        export_scores(&path, &self.scored)?;
        writeln!(out, "\n  CSV export saved to: {}", path.display())?;
        Ok(())
    }

    fn sla<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        let records = build_sla_records(&self.scored, &self.contacts);
        write!(out, "{}", SlaTrackerReport::new(&records))?;

        let path = self.config.output.path_for(SLA_CSV);
        export_sla(&path, &records)?;
        writeln!(out, "  CSV export saved to: {}", path.display())?;
        Ok(())
    }

    fn crm<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        let records = build_crm_records(&self.scored, &self.contacts);
        write!(out, "{}", CrmTable::new(&records))?;
        write!(out, "{}", OwnerWorkload::new(&records))?;
        write!(out, "{}", CrmRecordDetail::new(&records))?;

        let path = self.config.output.path_for(CRM_CSV);
        export_crm(&path, &records)?;
        writeln!(out, "\n  CSV export saved to: {}", path.display())?;
        Ok(())
    }

    fn hooks<W: Write>(&self, out: &mut W) -> Result<(), AppError> {
        write!(out, "{}", HooksReport::new(&self.scored))?;
        Ok(())
    }

    fn pipeline<W: Write>(&self, args: &PipelineArgs, out: &mut W) -> Result<(), AppError> {
        let summary = build_pipeline_summary(&self.scored, &self.contacts);
        if args.json {
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)?;
        } else {
            write!(out, "{summary}")?;
        }
        Ok(())
    }
}
