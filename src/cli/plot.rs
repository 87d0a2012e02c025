use std::io;

use svg::{
    node::{
        self,
        element::{Circle, Group, Line, Polyline, Text},
    },
    Document,
};

use crate::lib::{entry::StressLevel, summary::Calendar};

/// Line chart of the weekly average stress
pub struct Plotter<'d> {
    data: &'d Calendar,
}

impl<'d> Plotter<'d> {
    pub fn from(data: &'d Calendar) -> Self {
        Self { data }
    }

    /// Render and write to `file` as SVG
    pub fn save(&self, file: &str) -> io::Result<()> {
        svg::save(file, &self.document())?;
        tracing::info!(file, "trend chart saved");
        Ok(())
    }

    pub fn document(&self) -> Document {
        self.trend_drawer().render()
    }

    /// Weeks without any reported stress level have no point
    fn trend_drawer(&self) -> TrendDrawer {
        TrendDrawer {
            points: self
                .data
                .contents()
                .iter()
                .filter_map(|sum| sum.mean().map(|mean| (sum.week().to_string(), mean)))
                .collect::<Vec<_>>(),
            reference: self.data.overall_mean(),
        }
    }
}

#[derive(Debug)]
struct TrendDrawer {
    /// label of the x coordinate, y value
    points: Vec<(String, f64)>,
    /// drawn as a horizontal line
    reference: Option<f64>,
}

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const LEFT: f64 = 80.0;
const RIGHT: f64 = 40.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = 110.0;
const YMIN: f64 = StressLevel::MIN as f64;
const YMAX: f64 = StressLevel::MAX as f64;

const SERIES: &str = "steelblue";
const REFERENCE: &str = "firebrick";
const GRID: &str = "#cccccc";

fn label<S>(x: f64, y: f64, anchor: &str, content: S) -> Text
where
    S: Into<String>,
{
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-family", "sans-serif")
        .set("font-size", 12)
        .add(node::Text::new(content))
}

fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
}

impl TrendDrawer {
    fn render(&self) -> Document {
        let width = WIDTH - LEFT - RIGHT;
        let height = HEIGHT - TOP - BOTTOM;
        let count = self.points.len().max(1) as f64;
        // one slot per week, point in the middle of its slot
        let resize_x = |i: usize| LEFT + (i as f64 + 0.5) * width / count;
        let resize_y = |y: f64| TOP + (YMAX - y) / (YMAX - YMIN) * height;

        let mut grid = Group::new()
            .set("stroke", GRID)
            .set("stroke-width", 1)
            .set("stroke-dasharray", "2,4");
        let mut yticks = Group::new();
        for level in StressLevel::MIN..=StressLevel::MAX {
            let y = resize_y(level as f64);
            grid = grid.add(segment(LEFT, y, LEFT + width, y));
            yticks = yticks.add(label(LEFT - 10.0, y + 4.0, "end", level.to_string()));
        }
        let mut xticks = Group::new();
        for (i, (week, _)) in self.points.iter().enumerate() {
            let x = resize_x(i);
            grid = grid.add(segment(x, TOP, x, TOP + height));
            let y = TOP + height + 15.0;
            xticks = xticks.add(
                label(x, y, "end", week.as_str())
                    .set("transform", format!("rotate(-45 {} {})", x, y)),
            );
        }

        let axes = Group::new()
            .set("stroke", "black")
            .set("stroke-width", 2)
            .add(segment(LEFT, TOP, LEFT, TOP + height))
            .add(segment(LEFT, TOP + height, LEFT + width, TOP + height));

        let coords = self
            .points
            .iter()
            .enumerate()
            .map(|(i, (_, mean))| (resize_x(i), resize_y(*mean)))
            .collect::<Vec<_>>();
        let line = Polyline::new()
            .set("fill", "none")
            .set("stroke", SERIES)
            .set("stroke-width", 2)
            .set(
                "points",
                coords
                    .iter()
                    .map(|(x, y)| format!("{},{}", x, y))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        let dots = coords.iter().fold(Group::new().set("fill", SERIES), |g, (x, y)| {
            g.add(Circle::new().set("cx", *x).set("cy", *y).set("r", 4))
        });

        let title = label(WIDTH / 2.0, TOP / 2.0, "middle", "Weekly Average Stress Level")
            .set("font-size", 20);
        let xname = label(LEFT + width / 2.0, HEIGHT - 10.0, "middle", "Week");
        let yname = label(20.0, TOP + height / 2.0, "middle", "Average Stress Level")
            .set("transform", format!("rotate(-90 20 {})", TOP + height / 2.0));

        let mut document = Document::new()
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
            .add(grid)
            .add(axes)
            .add(yticks)
            .add(xticks)
            .add(title)
            .add(xname)
            .add(yname)
            .add(line)
            .add(dots);
        if let Some(mean) = self.reference {
            let y = resize_y(mean);
            document = document
                .add(
                    segment(LEFT, y, LEFT + width, y)
                        .set("stroke", REFERENCE)
                        .set("stroke-width", 1.5)
                        .set("stroke-dasharray", "6,4"),
                )
                .add(
                    label(LEFT + width - 5.0, y - 6.0, "end", format!("Average: {:.2}", mean))
                        .set("fill", REFERENCE),
                );
        }
        document
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::entry::{Entry, Mood};
    use chrono::NaiveDate;

    macro_rules! ent {
        ( $y:tt - $m:tt - $d:tt => $s:expr ) => {
            Entry::new(
                NaiveDate::from_ymd_opt($y, $m, $d).unwrap(),
                Mood::Neutral,
                String::new(),
                StressLevel::new($s),
                String::new(),
            )
        };
    }

    fn render(log: &[Entry]) -> String {
        let cal = Calendar::weekly(log).unwrap();
        Plotter::from(&cal).document().to_string()
    }

    #[test]
    fn one_point_per_week() {
        let shown = render(&[
            ent!(2024-3-3 => 1),
            ent!(2024-3-5 => 4),
            ent!(2024-3-10 => 2),
            ent!(2024-3-17 => 3),
        ]);
        assert_eq!(shown.matches("<circle").count(), 3);
        assert!(shown.contains("2024-09"));
        assert!(shown.contains("2024-10"));
        assert!(shown.contains("2024-11"));
        assert!(shown.contains("rotate(-45"));
        assert!(shown.contains("Average: 2.50"));
        assert!(shown.contains("stroke-dasharray"));
    }

    #[test]
    fn fixed_vertical_range() {
        // 5 is the top of the plot, 1 its bottom, whatever the data
        let drawer = TrendDrawer {
            points: vec![("2024-01".to_string(), 5.0), ("2024-02".to_string(), 1.0)],
            reference: Some(3.0),
        };
        let shown = drawer.render().to_string();
        let top = format!("{},{}", LEFT + 0.25 * (WIDTH - LEFT - RIGHT), TOP);
        let bottom = format!("{},{}", LEFT + 0.75 * (WIDTH - LEFT - RIGHT), HEIGHT - BOTTOM);
        assert!(shown.contains(&top), "{}", shown);
        assert!(shown.contains(&bottom), "{}", shown);
        assert!(shown.contains("Average: 3.00"));
    }

    #[test]
    fn weeks_without_stress_are_skipped() {
        let shown = render(&[ent!(2024-3-3 => 2), ent!(2024-3-10 => 0)]);
        assert_eq!(shown.matches("<circle").count(), 1);
        assert!(!shown.contains("2024-10"));
        assert!(shown.contains("Average: 2.00"));
    }

    #[test]
    fn no_reference_without_stress() {
        let shown = render(&[ent!(2024-3-3 => 0), ent!(2024-3-10 => 0)]);
        assert_eq!(shown.matches("<circle").count(), 0);
        assert!(!shown.contains("Average:"));
    }

    #[test]
    fn save_to_file() {
        let cal = Calendar::weekly(&[ent!(2024-3-3 => 2), ent!(2024-3-4 => 3)]).unwrap();
        let file = std::env::temp_dir()
            .join(format!("moodlog-chart-{}.svg", std::process::id()))
            .to_string_lossy()
            .into_owned();
        Plotter::from(&cal).save(&file).unwrap();
        let contents = std::fs::read_to_string(&file).unwrap();
        assert!(contents.contains("<svg"));
        std::fs::remove_file(&file).unwrap();
        assert!(Plotter::from(&cal)
            .save("/nonexistent-moodlog-dir/chart.svg")
            .is_err());
    }
}
