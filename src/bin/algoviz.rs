use std::{
    cell::RefCell,
    io::{self, Write as _},
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use algoviz::{
    Algorithm, BinaryTree, Clock as _, FrameRenderer as _, GenerateRequest, PlaybackController,
    PlaybackFrame, PlaybackSink, PlaybackStatus, SpeedMs, StepSequence, StructureKind,
    StructureOp, SystemClock, TextRenderer, TextSink, TraversalOrder, VizConfig,
};

#[derive(Parser, Debug)]
#[command(name = "algoviz", version, about = "Step-by-step algorithm visualizer")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config overriding per-visualizer limits and speeds.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a step sequence and print it.
    Generate(GenerateArgs),
    /// Play a step sequence in the terminal in real time.
    Play(PlayArgs),
    /// Apply operations to a stack, queue or linked list.
    Structure(StructureArgs),
    /// Print the effective configuration as JSON.
    Config,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Visualizer to run, e.g. `binary-search`, `merge-sort`, `tower-of-hanoi`.
    #[arg(long, short)]
    algorithm: Option<Algorithm>,

    /// Comma-separated numbers for search and sort, e.g. `5,3,8,1`.
    #[arg(long, allow_hyphen_values = true)]
    array: Option<String>,

    /// Search target.
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,

    /// `n` for factorial/fibonacci, disk count for tower-of-hanoi.
    #[arg(long)]
    n: Option<u32>,

    /// Traversal order.
    #[arg(long, value_enum, default_value_t = OrderArg::InOrder)]
    order: OrderArg,

    /// Binary tree JSON for tree-traversal; defaults to the sample tree.
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Full request JSON (`{"algorithm": ..., ...}`) instead of the flags above.
    #[arg(long, conflicts_with = "algorithm")]
    request: Option<PathBuf>,

    /// Generate random input for `--algorithm` instead of reading `--array`/`--target`/`--n`.
    #[arg(long, conflicts_with_all = ["array", "target", "n", "request"])]
    random: bool,

    /// Seed for `--random`; the same seed always yields the same input.
    #[arg(long, requires = "random")]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Tick interval in milliseconds; defaults to the visualizer's configured speed.
    #[arg(long)]
    speed: Option<u64>,
}

#[derive(Args, Debug)]
struct StructureArgs {
    /// Structure to operate on.
    #[arg(long, value_enum)]
    kind: KindArg,

    /// Operation, repeatable and applied in order: `push:5`, `pop`, `peek`, `enqueue:a`,
    /// `dequeue`, `front`, `insert-head:v`, `insert-tail:v`, `insert-at:1:v`, `delete-head`,
    /// `delete-tail`, `delete-at:1`, `clear`.
    #[arg(long = "op", required = true)]
    ops: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl From<OrderArg> for TraversalOrder {
    fn from(o: OrderArg) -> Self {
        match o {
            OrderArg::InOrder => TraversalOrder::InOrder,
            OrderArg::PreOrder => TraversalOrder::PreOrder,
            OrderArg::PostOrder => TraversalOrder::PostOrder,
            OrderArg::LevelOrder => TraversalOrder::LevelOrder,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Stack,
    Queue,
    LinkedList,
}

impl From<KindArg> for StructureKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Stack => StructureKind::Stack,
            KindArg::Queue => StructureKind::Queue,
            KindArg::LinkedList => StructureKind::LinkedList,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => VizConfig::from_path(path)?,
        None => VizConfig::default(),
    };

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args, &config),
        Command::Play(args) => cmd_play(args, &config),
        Command::Structure(args) => cmd_structure(args, &config),
        Command::Config => print_out(&config.to_json_pretty()?),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Write to stdout, reporting a closed or full stream as an error instead of panicking.
fn print_out(text: &str) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{text}")
        .and_then(|()| out.flush())
        .context("write output")
}

fn parse_array(raw: &str) -> anyhow::Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| anyhow::anyhow!("Array contains non-numeric values."))
}

fn parse_target(raw: Option<&str>) -> anyhow::Result<i64> {
    let raw = raw.context("--target is required for search")?;
    raw.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Target must be a number."))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {what} '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {what} JSON"))
}

fn build_request(input: &InputArgs, config: &VizConfig) -> anyhow::Result<GenerateRequest> {
    if let Some(path) = &input.request {
        return read_json(path, "request");
    }
    let algorithm = input
        .algorithm
        .context("either --algorithm or --request is required")?;

    if input.random {
        let seed = input.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "random input");
        eprintln!("random seed: {seed}");
        return Ok(algoviz::random_request(algorithm, config, seed)?);
    }

    let array = || -> anyhow::Result<Vec<i64>> {
        parse_array(input.array.as_deref().context("--array is required")?)
    };
    let n = || input.n.context("--n is required");

    let req = match algorithm {
        Algorithm::LinearSearch => GenerateRequest::LinearSearch {
            array: array()?,
            target: parse_target(input.target.as_deref())?,
        },
        Algorithm::BinarySearch => {
            let array = array()?;
            if array.windows(2).any(|w| w[0] > w[1]) {
                anyhow::bail!("Array must be sorted in ascending order.");
            }
            GenerateRequest::BinarySearch {
                array,
                target: parse_target(input.target.as_deref())?,
            }
        }
        Algorithm::BubbleSort => GenerateRequest::BubbleSort { array: array()? },
        Algorithm::SelectionSort => GenerateRequest::SelectionSort { array: array()? },
        Algorithm::InsertionSort => GenerateRequest::InsertionSort { array: array()? },
        Algorithm::MergeSort => GenerateRequest::MergeSort { array: array()? },
        Algorithm::QuickSort => GenerateRequest::QuickSort { array: array()? },
        Algorithm::HeapSort => GenerateRequest::HeapSort { array: array()? },
        Algorithm::Factorial => GenerateRequest::Factorial { n: n()? },
        Algorithm::Fibonacci => GenerateRequest::Fibonacci { n: n()? },
        Algorithm::TowerOfHanoi => GenerateRequest::TowerOfHanoi { disks: n()? },
        Algorithm::TreeTraversal => GenerateRequest::TreeTraversal {
            order: input.order.into(),
            tree: match &input.tree {
                Some(path) => Some(read_json::<BinaryTree>(path, "tree")?),
                None => None,
            },
        },
        Algorithm::Stack | Algorithm::Queue | Algorithm::LinkedList => {
            anyhow::bail!("'{algorithm}' is stateful; use the `structure` subcommand")
        }
    };
    Ok(req)
}

fn render_text(seq: &StepSequence) -> anyhow::Result<String> {
    let mut renderer = TextRenderer::default();
    let mut out = String::new();
    for (i, step) in seq.iter().enumerate() {
        let frame = algoviz::to_visual(step);
        out.push_str(&format!(
            "--- step {}/{} [{}]\n",
            i + 1,
            seq.len(),
            step.kind()
        ));
        out.push_str(&renderer.render(&frame)?);
    }
    Ok(out)
}

fn cmd_generate(args: GenerateArgs, config: &VizConfig) -> anyhow::Result<()> {
    let req = build_request(&args.input, config)?;
    let seq = algoviz::generate(&req, config)
        .with_context(|| format!("generate '{}'", req.algorithm()))?;

    let text = match args.format {
        Format::Json => seq.to_json_pretty()?,
        Format::Text => render_text(&seq)?,
    };

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {} ({} steps)", path.display(), seq.len());
        }
        None => print_out(&text)?,
    }
    Ok(())
}

fn cmd_play(args: PlayArgs, config: &VizConfig) -> anyhow::Result<()> {
    let req = build_request(&args.input, config)?;
    let seq = algoviz::generate(&req, config)
        .with_context(|| format!("generate '{}'", req.algorithm()))?;
    let speed = match args.speed {
        Some(ms) => SpeedMs::new(ms)?,
        None => config.settings(req.algorithm()).speed()?,
    };

    let sink = SharedSink(Rc::new(RefCell::new(TextSink::new(io::stdout()))));
    let mut controller = PlaybackController::new(SystemClock::new(), speed);
    controller.subscribe(sink.clone());
    controller.load(seq);
    controller.start();
    sink.check()?;

    while controller.status() == PlaybackStatus::Running {
        let Some(deadline) = controller.next_deadline() else {
            break;
        };
        let now = controller.clock().now_ms();
        if deadline > now {
            std::thread::sleep(Duration::from_millis(deadline - now));
        }
        controller.poll();
        sink.check()?;
    }
    sink.check()
}

/// Terminal sink the play loop can still inspect after handing a clone to the controller.
#[derive(Clone)]
struct SharedSink(Rc<RefCell<TextSink<io::Stdout>>>);

impl SharedSink {
    fn check(&self) -> anyhow::Result<()> {
        match self.0.borrow_mut().take_error() {
            Some(e) => Err(e).context("write frame"),
            None => Ok(()),
        }
    }
}

impl PlaybackSink for SharedSink {
    fn on_step(&mut self, frame: &PlaybackFrame<'_>) {
        self.0.borrow_mut().on_step(frame);
    }

    fn on_status(&mut self, status: PlaybackStatus) {
        self.0.borrow_mut().on_status(status);
    }
}

fn parse_op(raw: &str) -> anyhow::Result<StructureOp> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let a = parts.next();
    let b = parts.next();

    let value = |v: Option<&str>| -> anyhow::Result<String> {
        Ok(v.context(format!("'{name}' needs a value, e.g. {name}:5"))?
            .to_owned())
    };
    let index = |v: Option<&str>| -> anyhow::Result<usize> {
        v.context(format!("'{name}' needs an index"))?
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Index must be a non-negative number."))
    };

    let op = match name {
        "push" => StructureOp::Push { value: value(a)? },
        "pop" => StructureOp::Pop,
        "peek" => StructureOp::Peek,
        "enqueue" => StructureOp::Enqueue { value: value(a)? },
        "dequeue" => StructureOp::Dequeue,
        "front" => StructureOp::Front,
        "insert-head" => StructureOp::InsertHead { value: value(a)? },
        "insert-tail" => StructureOp::InsertTail { value: value(a)? },
        "insert-at" => StructureOp::InsertAt {
            index: index(a)?,
            value: value(b)?,
        },
        "delete-head" => StructureOp::DeleteHead,
        "delete-tail" => StructureOp::DeleteTail,
        "delete-at" => StructureOp::DeleteAt { index: index(a)? },
        "clear" => StructureOp::Clear,
        other => anyhow::bail!("unknown operation '{other}'"),
    };
    Ok(op)
}

fn cmd_structure(args: StructureArgs, config: &VizConfig) -> anyhow::Result<()> {
    let ops = args
        .ops
        .iter()
        .map(|raw| parse_op(raw).with_context(|| format!("parse operation '{raw}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut state = algoviz::new_structure(args.kind.into(), config)?;
    let mut sequences = Vec::with_capacity(ops.len());
    for (raw, op) in args.ops.iter().zip(&ops) {
        let outcome = algoviz::apply(&state, op).with_context(|| format!("apply '{raw}'"))?;
        state = outcome.structure;
        sequences.push(outcome.steps);
    }

    match args.format {
        Format::Json => print_out(&serde_json::to_string_pretty(&sequences)?),
        Format::Text => {
            let mut text = String::new();
            for seq in &sequences {
                text.push_str(&render_text(seq)?);
            }
            print_out(text.trim_end_matches('\n'))
        }
    }
}
