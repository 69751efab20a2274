//! Keyboard Session Demo
//!
//! Drives the calculator page with a scripted keyboard session and prints the
//! display after every step, including an error that reverts after its delay.
//!
//! Run with: RUST_LOG=calc_widget=debug cargo run --example keyboard_session

use std::time::Duration;

use calc_widget::config::WidgetConfig;
use calc_widget::wasm::{CalculatorPage, MemoryStore, MockDom};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();

    let config = WidgetConfig::default();
    println!("Keyboard session (revert delay {} ms)", config.revert_delay_ms);
    println!("{:-<44}", "");

    let mut page = CalculatorPage::with_config(config, MemoryStore::new());
    let script: &[&str] = &[
        "1", "2", "+", "3", "*", "4", "Enter", "/", "0", "=", "Backspace", "8", "=", "c",
    ];

    for key in script {
        let prevented = page.key(key);
        println!(
            "{:>10} | {:>14} | {:<12}{}",
            key,
            page.display_text(),
            page.history_text(),
            if prevented { " (default prevented)" } else { "" }
        );
        if page.error_shown() {
            page.advance(Duration::from_millis(700));
            println!("{:>10} | {:>14} |", "+700ms", page.display_text());
        }
    }

    println!("{:-<44}", "");
    page.click(MockDom::MODE_TOGGLE_ID);
    println!(
        "theme: {:?}, toggle button: {}",
        page.theme(),
        page.dom()
            .element_text(MockDom::MODE_TOGGLE_ID)
            .unwrap_or_default()
    );
}
