use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Parser;
use futures::executor::block_on;
use studviz::api::{
    AppConfig, ChoroplethMap, Controller, ControllerState, DataSource, DirectorySource,
    LineChart, MemoryCookieJar, PageViews, export_page_html,
};
use studviz::core::FilterAttribute;
use studviz::render::SvgRenderer;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the student-demographics map and chart as SVG")]
struct Args {
    /// Directory holding the manifest, the CSV file and the region geometry
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON application config; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    nationality: Option<String>,

    #[arg(long)]
    sex: Option<String>,

    #[arg(long)]
    semester: Option<String>,

    /// Cookie header to start from, e.g. `device_notice_confirmed=true`
    #[arg(long, default_value = "")]
    cookie: String,

    /// Output directory for map.svg, chart.svg and index.html
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let _ = studviz::telemetry::init_default_tracing();

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            AppConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => AppConfig::default(),
    };

    let source: Rc<dyn DataSource> = Rc::new(DirectorySource::new(args.data_dir.clone()));
    let cookies = Box::new(MemoryCookieJar::from_header(&args.cookie));
    let map = ChoroplethMap::from_config(SvgRenderer::new(), &config)
        .map_err(|err| err.to_string())?;
    let chart =
        LineChart::from_config(SvgRenderer::new(), &config).map_err(|err| err.to_string())?;

    let mut controller = block_on(Controller::initialize(
        config, source, cookies, map, chart,
    ))
    .map_err(|err| err.to_string())?;

    if controller.state() == ControllerState::Interactive {
        for (attribute, value) in [
            (FilterAttribute::Nationality, args.nationality),
            (FilterAttribute::Sex, args.sex),
            (FilterAttribute::Semester, args.semester),
        ] {
            if let Some(value) = value {
                block_on(controller.select(attribute, value)).map_err(|err| err.to_string())?;
            }
        }
    }

    fs::create_dir_all(&args.out)
        .map_err(|err| format!("failed to create `{}`: {err}", args.out.display()))?;
    let map_svg = controller.map().renderer().document().to_owned();
    let chart_svg = controller.chart().renderer().document().to_owned();
    let views = PageViews {
        map_svg: (!map_svg.is_empty()).then_some(map_svg.as_str()),
        chart_svg: (!chart_svg.is_empty()).then_some(chart_svg.as_str()),
    };
    if let Some(document) = views.map_svg {
        write_text(&args.out.join("map.svg"), document)?;
    }
    if let Some(document) = views.chart_svg {
        write_text(&args.out.join("chart.svg"), document)?;
    }
    let html = export_page_html(
        controller.page(),
        &controller.config().selectors,
        &controller.config().device_notice,
        views,
    );
    write_text(&args.out.join("index.html"), &html)?;

    if let Some(err) = controller.last_error() {
        return Err(err.to_string());
    }
    let selection = controller.selection();
    info!(
        key_x = %selection.key_x,
        key_y = %selection.key_y,
        out = %args.out.display(),
        "views exported"
    );
    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<(), String> {
    fs::write(path, content).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}
