pub mod axis;
pub mod bar;
pub mod gantt;
pub mod model;

pub use bar::BarChart;
pub use gantt::GanttChart;
pub use model::{
    BarLayout, BarSeries, ChartConfig, GanttBar, LegendEntry, Orientation,
};
