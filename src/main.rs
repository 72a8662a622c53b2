use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ninebox::config::{EngineConfig, PreferenceLocation};
use ninebox::engine::{
    FocusState, FocusStateMachine, GridTemplate, MemoryPreferences, PositionMapper,
    PreferenceStore,
};
use ninebox::models::Position;
use ninebox::roster::Roster;
use ninebox::snapshot::GridSnapshot;
use ninebox::{api, db, render};

#[derive(Parser)]
#[command(name = "ninebox")]
#[command(about = "Performance x potential calibration grid")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the grid engine over HTTP
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "17020")]
        port: u16,

        /// Roster JSON file (overrides NINEBOX_ROSTER)
        #[arg(short, long)]
        roster: Option<PathBuf>,
    },
    /// Print the position to level table
    Positions,
    /// Print the grid template for a focus state
    Layout {
        /// Box to expand; omit for the normal layout
        #[arg(short, long)]
        expanded: Option<u8>,

        #[arg(long, default_value = "1200")]
        width: u32,

        #[arg(long, default_value = "800")]
        height: u32,
    },
    /// Inspect or change the remembered expanded box
    Focus {
        #[command(subcommand)]
        action: FocusAction,
    },
    /// Render a roster as an ASCII grid
    Show {
        roster: PathBuf,

        /// Show the donut calibration view
        #[arg(long)]
        donut: bool,
    },
}

#[derive(Subcommand)]
enum FocusAction {
    Show,
    Expand { position: i64 },
    Collapse,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ninebox=debug,tower_http=debug".into()),
    );

    // stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_preferences(config: &EngineConfig) -> anyhow::Result<Arc<dyn PreferenceStore>> {
    let store: Arc<dyn PreferenceStore> = match &config.preferences {
        PreferenceLocation::Memory => Arc::new(MemoryPreferences::new()),
        PreferenceLocation::Default => {
            let db = db::Database::open_default()?;
            db.migrate()?;
            Arc::new(db)
        }
        PreferenceLocation::File(path) => {
            let db = db::Database::open(path.clone())?;
            db.migrate()?;
            Arc::new(db)
        }
    };
    Ok(store)
}

fn describe(state: FocusState) -> String {
    match state {
        FocusState::Normal => "normal".to_string(),
        FocusState::Focused(position) => format!("expanded {} ({})", position, position.short_label()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let config = EngineConfig::from_env();

    match cli.command.unwrap_or(Commands::Serve {
        port: 17020,
        roster: None,
    }) {
        Commands::Serve { port, roster } => {
            let roster = match roster.or_else(|| config.roster.clone()) {
                Some(path) => Roster::load(&path)?,
                None => Roster::default(),
            };
            tracing::info!("Loaded {} employees", roster.all().len());

            let state = api::AppState::new(roster, open_preferences(&config)?, config.collapsed_strip);
            let app = api::create_router(state);

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("ninebox listening on http://127.0.0.1:{}", port);

            axum::serve(listener, app).await?;
        }
        Commands::Positions => {
            println!("pos  label  performance  potential  row  col");
            for position in Position::ALL {
                let levels = position.levels();
                let rc = PositionMapper::row_col_of(position);
                println!(
                    "{:<4} {:<6} {:<12} {:<10} {:<4} {}",
                    position,
                    position.short_label(),
                    levels.performance.as_str(),
                    levels.potential.as_str(),
                    rc.row,
                    rc.col
                );
            }
        }
        Commands::Layout {
            expanded,
            width,
            height,
        } => {
            let focus = match expanded {
                Some(raw) => FocusState::Focused(Position::try_from(raw)?),
                None => FocusState::Normal,
            };
            let template = GridTemplate::compute(focus, config.collapsed_strip);
            let (columns, rows) = template.to_css();
            let (widths, heights) = template.resolve(width, height);
            println!("grid-template-columns: {}", columns);
            println!("grid-template-rows: {}", rows);
            println!("column widths: {:?}", widths);
            println!("row heights: {:?}", heights);
        }
        Commands::Focus { action } => {
            let mut focus = FocusStateMachine::new(open_preferences(&config)?);
            let state = match action {
                FocusAction::Show => focus.state(),
                FocusAction::Expand { position } => focus.expand(position),
                FocusAction::Collapse => focus.collapse(),
            };
            println!("{}", describe(state));
        }
        Commands::Show { roster, donut } => {
            let roster = Roster::load(&roster)?;
            roster.set_donut_mode(donut);
            let focus = FocusStateMachine::new(open_preferences(&config)?);
            let snapshot = GridSnapshot::capture(&roster, &focus, donut, config.collapsed_strip);
            print!("{}", render::render_grid(&snapshot));
        }
    }

    Ok(())
}
