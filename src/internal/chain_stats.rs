#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::unwrap_used)]

use std::{cell::Cell, rc::Rc};

use chainmap::{ChainStats, ChainedHashTable, GrowthCheck, TableEvent};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};

// Every configuration starts from the same slot count
const INITIAL_CAPACITY: usize = 7;
// Key counts from 1_000 to 50_000 with 10 steps
const NUM_STEPS: usize = 10;
const MIN_KEYS: usize = 1_000;
const MAX_KEYS: usize = 50_000;
const KEY_LEN: usize = 12;

// Table configurations to compare
const CONFIGS: [(&str, f64, GrowthCheck); 4] = [
    ("threshold 0.75, fractional", 0.75, GrowthCheck::Fractional),
    ("threshold 1.0, truncating", 1.0, GrowthCheck::Truncating),
    ("threshold 3.0, fractional", 3.0, GrowthCheck::Fractional),
    ("threshold 3.0, truncating", 3.0, GrowthCheck::Truncating),
];

struct Run {
    stats: ChainStats,
    resizes: usize,
}

fn random_key(rng: &mut impl Rng) -> String {
    rng.sample_iter(Alphanumeric).take(KEY_LEN).map(char::from).collect()
}

// Inserts `keys` into a fresh table and counts the resizes it went through
fn fill(keys: &[String], threshold: f64, growth_check: GrowthCheck) -> Run {
    let resizes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&resizes);

    let mut table = ChainedHashTable::builder(INITIAL_CAPACITY)
        .threshold(threshold)
        .growth_check(growth_check)
        .observer(move |event: &TableEvent<'_>| {
            if let TableEvent::Resized { .. } = event {
                counter.set(counter.get() + 1);
            }
        })
        .build()
        .unwrap();

    for key in keys {
        table.put(key, key).unwrap();
    }

    Run { stats: table.chain_stats(), resizes: resizes.get() }
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    num_keys: &[usize],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flat_map(|v| v.iter()).fold(0.0, |max: f64, &x| max.max(x)) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..num_keys.len(), 0.0..max_y)?;

    let x_labels: Vec<String> = num_keys.iter().map(|&n| n.to_string()).collect();

    chart
        .configure_mesh()
        .x_labels(num_keys.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (config_idx, &(name, _, _)) in CONFIGS.iter().enumerate() {
        let color = colors[config_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len()).map(|i| (i, series[config_idx][i])),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            (0..num_keys.len()).map(|i| Circle::new((i, series[config_idx][i]), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let num_keys: Vec<usize> = (0..NUM_STEPS)
        .map(|i| MIN_KEYS + (MAX_KEYS - MIN_KEYS) * i / (NUM_STEPS - 1))
        .collect();
    println!("Number of keys: {:?}", num_keys);

    // Generate the keys once so every configuration sees the same input
    let mut rng = rand::rng();
    let keys: Vec<String> = (0..MAX_KEYS).map(|_| random_key(&mut rng)).collect();

    let mut longest_chain: Vec<Vec<f64>> = vec![Vec::new(); CONFIGS.len()];
    let mut average_chain: Vec<Vec<f64>> = vec![Vec::new(); CONFIGS.len()];
    let mut final_capacity: Vec<Vec<f64>> = vec![Vec::new(); CONFIGS.len()];

    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (config_idx, &(name, threshold, growth_check)) in CONFIGS.iter().enumerate() {
            let run = fill(&keys[..n_keys], threshold, growth_check);

            longest_chain[config_idx].push(run.stats.longest_chain as f64);
            average_chain[config_idx].push(run.stats.average_chain_len());
            final_capacity[config_idx].push(run.stats.capacity as f64);

            println!(
                "  {}: capacity = {}, resizes = {}, longest chain = {}, avg chain = {:.2}, unused slots = {}",
                name,
                run.stats.capacity,
                run.resizes,
                run.stats.longest_chain,
                run.stats.average_chain_len(),
                run.stats.unused_slots
            );
        }
    }

    draw_chart(
        "longest_chain.png",
        "Longest Chain After Inserting",
        "Longest Chain (entries)",
        &num_keys,
        &longest_chain,
    )?;
    draw_chart(
        "average_chain.png",
        "Average Length of Occupied Chains",
        "Average Chain (entries)",
        &num_keys,
        &average_chain,
    )?;
    draw_chart(
        "final_capacity.png",
        "Slot Count After Inserting",
        "Capacity (slots)",
        &num_keys,
        &final_capacity,
    )?;

    println!("Generated plot images: longest_chain.png, average_chain.png, final_capacity.png");

    Ok(())
}
