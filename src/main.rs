//! Rubik - 无头回放驱动
//!
//! 加载配置、初始化日志，然后逐帧回放一段按键脚本，
//! 每当会话等待输入时送入下一个按键，并在状态行变化时输出日志。
//!
//! # 使用方法
//!
//! ```bash
//! # 打乱后自动还原
//! cargo run -- --script "S SPACE"
//!
//! # 固定种子，手动转两下再还原
//! cargo run -- --seed 42 --script "S I L SPACE" --frame-ms 16
//! ```
//!
//! # 命令行参数
//!
//! - `--config <path>`: 配置文件路径（默认 `cube.toml`）
//! - `--script <keys>`: 以空格分隔的按键序列，如 `"S I L SPACE"`
//! - `--max-frames <n>`: 最多运行的帧数
//! - `--frame-ms <ms>`: 每帧推进的模拟时间
//! - 以及 [`Config::apply_args`] 支持的覆盖参数

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context};
use rubik_cube::app::CubeApp;
use rubik_cube::core::config::arg_value;
use rubik_cube::core::event::{EventHandler, KeyCode, KeyboardEvent, TickEvent};
use rubik_cube::core::{log, Clock, Config, ManualClock};
use rubik_cube::cube::seeded_rng;
use tracing::{debug, info};

const DEFAULT_MAX_FRAMES: u64 = 100_000;
const DEFAULT_FRAME_MS: u64 = 16;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // 1. 加载配置（在初始化日志之前）
    let config_path =
        arg_value::<String>(&args, "--config").unwrap_or_else(|| "cube.toml".to_string());
    let mut config = Config::from_file_or_default(&config_path);

    // 2. 应用命令行参数
    config.apply_args(&args);

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "Rubik starting...");

    // 5. 解析按键脚本
    let script = arg_value::<String>(&args, "--script").unwrap_or_default();
    let mut pending = parse_script(&script)?;
    let max_frames = arg_value(&args, "--max-frames").unwrap_or(DEFAULT_MAX_FRAMES);
    let frame = Duration::from_millis(arg_value(&args, "--frame-ms").unwrap_or(DEFAULT_FRAME_MS));

    info!(
        keys = pending.len(),
        max_frames,
        frame_ms = frame.as_millis() as u64,
        shuffle_moves = config.session.shuffle_moves,
        seed = ?config.session.seed,
        "Replay configuration"
    );

    // 6. 逐帧回放
    let clock = Rc::new(ManualClock::new());
    let mut app = CubeApp::new(&config, Rc::clone(&clock), seeded_rng(config.session.seed));
    let mut last_state = app.session().state();

    for _ in 0..max_frames {
        if app.session().is_awaiting_input() {
            match pending.pop_front() {
                Some(key) => {
                    debug!(?key, "Feeding key");
                    app.handle_event(&mut KeyboardEvent::pressed(key));
                    app.handle_event(&mut KeyboardEvent::released(key));
                }
                None => break,
            }
        }
        if app.quit_requested() {
            info!("Quit requested, shutting down...");
            break;
        }

        let total = clock.now().as_secs_f32();
        app.handle_event(&mut TickEvent::new(frame.as_secs_f32(), total));
        clock.advance(frame);

        let state = app.session().state();
        if state.name() != last_state.name() {
            info!(status = %app.status_line(), "Session status");
        }
        last_state = state;
    }

    if !pending.is_empty() && !app.quit_requested() {
        bail!(
            "Frame limit reached with {} key(s) still pending ({})",
            pending.len(),
            app.status_line()
        );
    }

    info!(
        frames = app.frame_count(),
        history = app.session().puzzle().history.count(),
        "Replay finished: {}",
        app.status_line()
    );
    Ok(())
}

/// 把空格分隔的按键记号解析为按键序列
fn parse_script(script: &str) -> anyhow::Result<VecDeque<KeyCode>> {
    script
        .split_whitespace()
        .map(|token| {
            KeyCode::from_token(token)
                .with_context(|| format!("Unknown key in script: {:?}", token))
        })
        .collect()
}
