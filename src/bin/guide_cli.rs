#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("guide_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use dla_engine::geom::Point3;
    use dla_engine::parse::guide_xml;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::{Path, PathBuf};

    const DEFAULT_DELTA: f64 = 0.1;

    const USAGE: &str = r#"guide_cli (dla-engine)

USAGE:
  guide_cli <guides.xml> [options]

Walks the guide path in fixed steps and prints every visited point.

OPTIONS:
  --delta <f64>        Progress per step in segment units (default 0.1)
  --format <csv|obj>   Output format (default csv)
  --out <path>         Write to a file instead of stdout
  --overwrite          Overwrite an existing output file
  --stats              Print traversal diagnostics to stderr
  -v, --verbose        Log guide events to stderr (RUST_LOG overrides)
  -h, --help           Show this help
"#;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Format {
        Csv,
        Obj,
    }

    impl Format {
        fn parse(raw: &str) -> Result<Self, String> {
            match raw.to_ascii_lowercase().as_str() {
                "csv" => Ok(Self::Csv),
                "obj" => Ok(Self::Obj),
                other => Err(format!("unknown format `{other}` (expected csv or obj)")),
            }
        }
    }

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let mut input: Option<PathBuf> = None;
        let mut out: Option<PathBuf> = None;
        let mut delta = DEFAULT_DELTA;
        let mut format = Format::Csv;
        let mut overwrite = false;
        let mut stats = false;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--delta" => {
                    let raw = args.value("--delta")?;
                    delta = raw
                        .parse::<f64>()
                        .map_err(|e| format!("invalid --delta `{raw}`: {e}"))?;
                }
                "--format" => format = Format::parse(&args.value("--format")?)?,
                "--out" => out = Some(PathBuf::from(args.value("--out")?)),
                "--overwrite" => overwrite = true,
                "--stats" => stats = true,
                "-v" | "--verbose" => verbose = true,
                "-h" | "--help" => {
                    println!("{USAGE}");
                    return Ok(());
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown option `{other}`\n\n{USAGE}"));
                }
                other => {
                    if input.is_some() {
                        return Err(format!("unexpected argument `{other}`"));
                    }
                    input = Some(PathBuf::from(other));
                }
            }
        }

        init_logging(verbose);

        let Some(input) = input else {
            println!("{USAGE}");
            return Ok(());
        };

        let xml = fs::read_to_string(&input)
            .map_err(|e| format!("read {}: {e}", input.display()))?;
        let mut path = guide_xml::parse_str(&xml).map_err(|e| e.to_string())?;
        let points = path.sample(delta).map_err(|e| e.to_string())?;
        let name = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("guides");

        match out {
            Some(target) => {
                let mut w = create_output(&target, overwrite)?;
                write_points(&mut w, &points, format, name)
                    .and_then(|()| w.flush())
                    .map_err(|e| format!("write {}: {e}", target.display()))?;
            }
            None => {
                let stdout = io::stdout();
                let mut w = BufWriter::new(stdout.lock());
                write_points(&mut w, &points, format, name)
                    .and_then(|()| w.flush())
                    .map_err(|e| format!("write stdout: {e}"))?;
            }
        }

        if stats {
            eprintln!("{}", path.diagnostics());
        }
        Ok(())
    }

    fn init_logging(verbose: bool) {
        let default_level = if verbose { "debug" } else { "warn" };
        let env = env_logger::Env::default().default_filter_or(default_level);
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }

    fn create_output(path: &Path, overwrite: bool) -> Result<BufWriter<File>, String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        Ok(BufWriter::new(file))
    }

    fn write_points<W: Write>(w: &mut W, points: &[Point3], format: Format, name: &str) -> io::Result<()> {
        match format {
            Format::Csv => {
                writeln!(w, "x,y,z")?;
                for p in points {
                    writeln!(w, "{},{},{}", p.x, p.y, p.z)?;
                }
            }
            Format::Obj => {
                writeln!(w, "# dla-engine guide_cli")?;
                writeln!(w, "o {name}")?;
                for p in points {
                    writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
                }
                if points.len() >= 2 {
                    let indices: Vec<String> = (1..=points.len()).map(|i| i.to_string()).collect();
                    writeln!(w, "l {}", indices.join(" "))?;
                }
            }
        }
        Ok(())
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
