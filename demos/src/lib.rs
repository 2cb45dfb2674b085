// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the preview demos.
//!
//! The demos have no window: they play a scripted sequence of touches and
//! frame ticks against the headless preview and print what a host would draw.
//! Set `RUST_LOG=understory_preview=debug` to watch the lifecycle logs.

use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use understory_preview::PreviewFrame;

/// One display frame at 60 Hz, rounded.
pub const FRAME: Duration = Duration::from_millis(16);

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// A card from the sample catalog.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Card {
    /// Something for sale.
    Product {
        /// Display name.
        name: String,
        /// Price in cents.
        price_cents: u32,
        /// Average review score out of five.
        rating: f32,
    },
    /// A piece of writing.
    Article {
        /// Headline.
        title: String,
        /// Author byline.
        author: String,
        /// Estimated reading time.
        minutes: u32,
    },
    /// A place to visit.
    Travel {
        /// Destination name.
        place: String,
        /// Country.
        country: String,
    },
}

impl Card {
    /// One-line summary for the console.
    pub fn title(&self) -> String {
        match self {
            Self::Product {
                name,
                price_cents,
                rating,
            } => format!(
                "{name} (${}.{:02}, {rating:.1} stars)",
                price_cents / 100,
                price_cents % 100
            ),
            Self::Article {
                title,
                author,
                minutes,
            } => format!("{title} by {author}, {minutes} min read"),
            Self::Travel { place, country } => format!("{place}, {country}"),
        }
    }
}

const CATALOG: &str = r#"[
    { "kind": "product", "name": "Trail Runner 3", "price_cents": 12900, "rating": 4.6 },
    { "kind": "article", "title": "Designing for the thumb", "author": "M. Okafor", "minutes": 7 },
    { "kind": "travel", "place": "Lofoten", "country": "Norway" }
]"#;

/// The sample catalog.
pub fn catalog() -> Result<Vec<Card>, serde_json::Error> {
    serde_json::from_str(CATALOG)
}

/// Print one line describing `frame`, prefixed by the elapsed time.
pub fn print_frame(elapsed_ms: u64, frame: Option<&PreviewFrame>) {
    match frame {
        None => println!("{elapsed_ms:>5} ms  (nothing drawn)"),
        Some(frame) => {
            let c = &frame.container;
            println!(
                "{elapsed_ms:>5} ms  {:<8} {:<8} opacity {:.2}  scrim {:.2}  scale {:.3}  dy {:>7.1}",
                format!("{:?}", frame.phase),
                format!("{:?}", c.variant),
                frame.opacity,
                frame.backdrop.opacity,
                c.scale,
                c.translate_y,
            );
        }
    }
}
