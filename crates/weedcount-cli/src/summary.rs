use console::Style;
use weedcount_core::calibration::Calibration;
use weedcount_core::settings::Settings;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    result: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            result: Style::new().green().bold(),
            path: Style::new().underlined(),
        }
    }
}

/// What the calibration was computed for.
pub enum Subject<'a> {
    Image {
        path: &'a std::path::Path,
        width: u32,
        height: u32,
    },
    Height(f64),
}

pub fn print_calibration_summary(subject: &Subject<'_>, settings: &Settings, c: &Calibration) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Reference Box"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    match subject {
        Subject::Image {
            path,
            width,
            height,
        } => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Image"),
                s.path.apply_to(path.display())
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Dimensions"),
                s.value.apply_to(format!("{width}x{height}"))
            );
        }
        Subject::Height(h) => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Height"),
                s.value.apply_to(format!("{h} px"))
            );
        }
    }
    println!();

    println!("  {}", s.header.apply_to("Assumptions"));
    println!(
        "    {:<20}{}",
        s.label.apply_to("Focal length"),
        s.value.apply_to(format!("{} mm", settings.optics.focal_length_mm))
    );
    println!(
        "    {:<20}{}",
        s.label.apply_to("Sensor height"),
        s.value.apply_to(format!("{} mm", settings.optics.sensor_height_mm))
    );
    println!(
        "    {:<20}{}",
        s.label.apply_to("Distance"),
        s.value
            .apply_to(format!("{} m", settings.calibration.assumed_distance_m))
    );
    println!(
        "    {:<20}{}",
        s.label.apply_to("Reference size"),
        s.value
            .apply_to(format!("{} m", settings.calibration.reference_size_m))
    );
    println!();

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<20}{}",
        s.label.apply_to("Real-world height"),
        s.value.apply_to(format!("{:.4} m", c.real_world_height_m))
    );
    println!(
        "    {:<20}{}",
        s.label.apply_to("Pixels per metre"),
        s.value.apply_to(format!("{:.1}", c.pixels_per_meter))
    );
    println!(
        "    {:<20}{}",
        s.label.apply_to("Box"),
        s.result.apply_to(format!(
            "{:.1} x {:.1} px",
            c.box_size.width(),
            c.box_size.height()
        ))
    );
    println!();
}
