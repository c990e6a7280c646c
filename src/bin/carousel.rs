use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "carousel", version)]
struct Cli {
    #[arg(long, global = true)]
    font_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Render(RenderArgs),
    Export(ExportArgs),
    Style,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[arg(long)]
    image: Option<PathBuf>,

    #[arg(long, default_value = "")]
    caption: String,

    #[arg(long)]
    style: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = AspectChoice::Square)]
    aspect: AspectChoice,

    #[arg(long, default_value_t = carousel::DEFAULT_QUALITY)]
    quality: f32,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[arg(long = "image", required = true, num_args = 1..)]
    images: Vec<PathBuf>,

    #[arg(long)]
    captions: Option<String>,

    #[arg(long)]
    style: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = AspectChoice::Square)]
    aspect: AspectChoice,

    #[arg(long, default_value_t = carousel::DEFAULT_QUALITY)]
    quality: f32,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AspectChoice {
    Square,
    Vertical,
}

impl From<AspectChoice> for carousel::Aspect {
    fn from(choice: AspectChoice) -> Self {
        match choice {
            AspectChoice::Square => carousel::Aspect::Square,
            AspectChoice::Vertical => carousel::Aspect::Vertical,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let gate = match cli.font_dir {
        Some(dir) => Arc::new(carousel::FontGate::new(dir)),
        None => carousel::FontGate::global(),
    };
    match cli.cmd {
        Command::Render(args) => cmd_render(args, gate),
        Command::Export(args) => cmd_export(args, gate),
        Command::Style => cmd_style(),
    }
}

fn read_style(path: Option<&Path>) -> anyhow::Result<carousel::StyleConfiguration> {
    let Some(path) = path else {
        return Ok(carousel::base_preset().options);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read style '{}'", path.display()))?;
    carousel::StyleConfiguration::from_json_str(&json)
        .with_context(|| format!("parse style '{}'", path.display()))
}

fn read_upload(path: &Path) -> anyhow::Result<carousel::Upload> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(carousel::Upload::new(name, bytes))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_render(args: RenderArgs, gate: Arc<carousel::FontGate>) -> anyhow::Result<()> {
    let style = read_style(args.style.as_deref())?;
    let mut composer = carousel::Composer::new(gate);

    let bytes = match &args.image {
        Some(path) => {
            let upload = read_upload(path)?;
            let image = carousel::decode_image(&upload.bytes)
                .with_context(|| format!("decode image '{}'", path.display()))?;
            composer.export(
                args.aspect.into(),
                &image,
                &args.caption,
                &style,
                args.quality,
            )?
        }
        None => {
            let mut target = carousel::RenderTarget::for_aspect(args.aspect.into())?;
            composer.render(&mut target, None, &args.caption, &style)?;
            carousel::encode_jpeg(&target.readback(), args.quality)?
        }
    };

    write_output(&args.out, &bytes)
}

fn cmd_export(args: ExportArgs, gate: Arc<carousel::FontGate>) -> anyhow::Result<()> {
    let style = read_style(args.style.as_deref())?;
    let captions: Vec<String> = match &args.captions {
        Some(json) => serde_json::from_str(json).context("parse --captions JSON array")?,
        None => Vec::new(),
    };

    let uploads = args
        .images
        .iter()
        .map(|p| read_upload(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut session = carousel::CarouselSession::new(carousel::Composer::new(gate));
    session.set_style(style)?;
    session.set_aspect(args.aspect.into());

    let report = session.add_slides(uploads);
    if let Some(notice) = &report.notice {
        eprintln!("{notice}");
    }
    for (i, id) in report.accepted.iter().enumerate() {
        session.set_caption_for(*id, captions.get(i).cloned().unwrap_or_default());
    }

    let Some(archive) = session.export_all(Some(args.quality))? else {
        anyhow::bail!("no slides to export");
    };
    write_output(&args.out, &archive.bytes)
}

fn cmd_style() -> anyhow::Result<()> {
    let preset = carousel::base_preset();
    let json = serde_json::to_string_pretty(&preset.options).context("serialize style")?;
    println!("{json}");
    Ok(())
}
