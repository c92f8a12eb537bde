use std::path::Path;

use console::Style;
use flowlab_core::{FlowMethod, FlowStats};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

/// Print the method and inputs of a flow run.
pub fn print_run_header(inputs: &[&Path], width: usize, height: usize, method: &FlowMethod) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Optical Flow"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    for (i, path) in inputs.iter().enumerate() {
        let label = match (inputs.len(), i) {
            (2, 0) => "Previous".to_string(),
            (2, 1) => "Current".to_string(),
            _ => format!("Frame {i}"),
        };
        println!(
            "  {:<14}{}",
            s.label.apply_to(label),
            s.path.apply_to(path.display())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{width}x{height}"))
    );
    println!();

    println!("  {}", s.header.apply_to("Method"));
    match method {
        FlowMethod::None => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Algorithm"),
                s.disabled.apply_to("none")
            );
        }
        FlowMethod::LucasKanade(p) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Algorithm"),
                s.method.apply_to("Lucas-Kanade")
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Window"),
                s.value.apply_to(format!("{} px", p.window_size))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Grid Step"),
                s.value.apply_to(format!("{} px", p.grid_step))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Det Min"),
                s.value.apply_to(p.det_threshold)
            );
        }
        FlowMethod::HornSchunck(p) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Algorithm"),
                s.method.apply_to("Horn-Schunck")
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Alpha"),
                s.value.apply_to(p.alpha)
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Iterations"),
                s.value.apply_to(p.iterations)
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Grid Step"),
                s.value.apply_to(format!("{} px", p.grid_step))
            );
        }
    }
    println!();
}

/// Print statistics of a single flow field.
pub fn print_flow_stats(stats: &FlowStats) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Flow"));
    if stats.count == 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Vectors"),
            s.disabled.apply_to("none")
        );
        println!();
        return;
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Vectors"),
        s.value.apply_to(stats.count)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Mean (u,v)"),
        s.value
            .apply_to(format!("({:.4}, {:.4})", stats.mean_u, stats.mean_v))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Mean |f|"),
        s.value.apply_to(format!("{:.4} px", stats.mean_magnitude))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max |f|"),
        s.value.apply_to(format!("{:.4} px", stats.max_magnitude))
    );
    println!();
}

/// Print one table row per frame pair.
pub fn print_sequence_table(stats: &[FlowStats]) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Pairs"));
    println!(
        "  {:>6}  {:>8}  {:>10}  {:>10}  {:>10}  {:>10}",
        "Pair", "Vectors", "Mean u", "Mean v", "Mean |f|", "Max |f|"
    );
    println!("  {}", "-".repeat(64));
    for (i, st) in stats.iter().enumerate() {
        println!(
            "  {:>6}  {:>8}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}",
            format!("{}-{}", i, i + 1),
            st.count,
            st.mean_u,
            st.mean_v,
            st.mean_magnitude,
            st.max_magnitude
        );
    }
    println!();
}
