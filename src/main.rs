use clap::Parser;
use rangeforge::{Manifest, ManifestOptions, Range, Result, TreeStyle, TreeView};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 📚 rangeforge - 清单目录树工具
#[derive(Parser)]
#[command(name = "rangeforge")]
#[command(about = "解析IIIF清单的structures并显示目录树")]
#[command(version)]
struct Args {
    /// 清单文件路径
    #[arg(help = "要处理的清单JSON文件路径")]
    manifest_file: String,

    /// 日志详细程度
    #[arg(short, long, action = clap::ArgAction::Count, help = "显示更多日志（-v: info, -vv: debug）")]
    verbose: u8,

    /// 配置文件路径
    #[arg(short, long, help = "YAML配置文件路径（不存在时使用默认选项）")]
    config: Option<String>,

    /// 显示平铺的range列表
    #[arg(short, long, help = "显示平铺后的全部range")]
    ranges: bool,

    /// 显示目录树
    #[arg(short, long, help = "显示默认目录树")]
    tree: bool,

    /// 目录树显示样式
    #[arg(long, value_enum, default_value = "tree", help = "目录树的显示样式")]
    style: StyleArg,

    /// 目录树最大显示深度
    #[arg(long, help = "目录树最大显示深度")]
    max_depth: Option<u32>,

    /// 显示节点id
    #[arg(long, help = "在目录树中显示节点id和range路径")]
    show_ids: bool,

    /// 以JSON格式输出目录树
    #[arg(long, help = "以JSON格式输出默认目录树")]
    json: bool,

    /// 按标识符查找range
    #[arg(long, help = "按标识符查找range")]
    id: Option<String>,

    /// 按路径查找range
    #[arg(long, help = "按路径查找range，例如 0/1/2")]
    path: Option<String>,
}

/// 目录树显示样式
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    /// 树状符号
    Tree,
    /// 缩进
    Indented,
}

impl From<StyleArg> for TreeStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Tree => TreeStyle::TreeSymbols,
            StyleArg::Indented => TreeStyle::Indented,
        }
    }
}

fn main() {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("❌ 错误: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let options = match &args.config {
        Some(path) => ManifestOptions::from_file(path)?,
        None => ManifestOptions::default(),
    };

    let manifest = Manifest::from_path(&args.manifest_file, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(manifest.default_tree())?);
        return Ok(());
    }

    println!("📚 rangeforge - 清单目录树工具");
    if let Some(label) = manifest.label() {
        println!("  📖 清单: {}", label);
    }
    if let Some(id) = manifest.id() {
        println!("  🆔 标识符: {}", id);
    }
    println!("  🌳 顶层range: {} 个", manifest.top_ranges().len());
    println!("  📊 range总数: {} 个", manifest.all_ranges().len());

    let warnings = manifest
        .parse_issues()
        .iter()
        .filter(|issue| issue.is_warning())
        .count();
    if warnings > 0 {
        println!("  ⚠️  解析警告: {} 个", warnings);
    }

    if args.ranges {
        display_ranges(&manifest);
    }

    if let Some(id) = &args.id {
        println!("\n🔍 按标识符查找: {}", id);
        match manifest.range_by_id(id) {
            Some(range) => display_range(&manifest, range),
            None => println!("  ❌ 未找到range"),
        }
    }

    if let Some(path) = &args.path {
        println!("\n🔍 按路径查找: {}", path);
        match manifest.range_by_path(path) {
            Some(range) => display_range(&manifest, range),
            None => println!("  ❌ 未找到range"),
        }
    }

    if args.tree {
        let tree = manifest.default_tree();
        let view = TreeView::new(tree)
            .with_style(args.style.into())
            .with_show_ids(args.show_ids)
            .with_max_depth(args.max_depth);

        println!("\n🌳 目录树:");
        println!("  📊 {}", view.statistics());
        println!("\n{}", view);
    }

    Ok(())
}

/// 显示平铺后的range列表
fn display_ranges(manifest: &Manifest) {
    println!("\n📋 range列表:");
    for (i, range) in manifest.all_ranges().iter().enumerate() {
        println!(
            "  {}. [{}] {} ({})",
            i + 1,
            range.path(),
            range.label().unwrap_or("(无标题)"),
            range.id().unwrap_or("-")
        );
    }
}

/// 显示单个range的详情
fn display_range(manifest: &Manifest, range: &Range) {
    println!("  🆔 标识符: {}", range.id().unwrap_or("-"));
    println!("  📍 路径: {}", range.path());
    if let Some(label) = range.label() {
        println!("  🏷️  标签: {}", label);
    }
    if let Some(parent) = manifest.parent_of(range) {
        println!("  ⬆️  父range: {} ({})", parent.id().unwrap_or("-"), parent.path());
    }
    println!("  📂 子range: {} 个", range.items().len());

    let canvases = range.canvas_ids();
    if !canvases.is_empty() {
        println!("  🖼️  canvas: {} 个", canvases.len());
        for (i, canvas) in canvases.iter().enumerate() {
            println!("    {}. {}", i + 1, canvas);
        }
    }
}
