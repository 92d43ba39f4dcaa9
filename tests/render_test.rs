use cfmatrix::{Categories, PlotDefaults, RenderConfig, RenderError, Renderer};
use env_logger::{Builder, Env};
use ndarray::{array, Array2};

// Initialize test logger
fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .try_init();
}

fn renderer() -> Renderer {
    init();
    Renderer::new(PlotDefaults::default())
}

fn strings(rows: Array2<&str>) -> Array2<String> {
    rows.mapv(String::from)
}

#[test]
fn test_all_toggles_off_renders() -> Result<(), RenderError> {
    let cf = array![[4.0, 1.0, 0.0], [2.0, 6.0, 1.0]];
    let figure = renderer().render(cf.view(), &RenderConfig::minimal())?;

    assert!(figure.annotations.iter().all(String::is_empty));
    assert!(figure.x_tick_labels.is_none() && figure.y_tick_labels.is_none());
    assert!(figure.x_label.is_empty());
    assert!(figure.y_label.is_none());
    assert!(!figure.colorbar);

    let svg = figure.to_svg()?;
    assert!(svg.contains("<rect"));
    Ok(())
}

#[test]
fn test_counts_as_whole_numbers() -> Result<(), RenderError> {
    let cf = array![[5.0, 0.0], [1.0, 9.0]];
    let config = RenderConfig::default().with_percent(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.annotations, strings(array![["5", "0"], ["1", "9"]]));
    Ok(())
}

#[test]
fn test_percent_of_grand_total() -> Result<(), RenderError> {
    let cf = array![[3.0, 1.0], [0.0, 6.0]];
    let config = RenderConfig::default().with_count(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.annotations[[0, 0]], "30.00%");
    assert_eq!(figure.annotations[[1, 1]], "60.00%");
    Ok(())
}

#[test]
fn test_count_and_percent_stack() -> Result<(), RenderError> {
    let cf = array![[3.0, 1.0], [0.0, 6.0]];
    let figure = renderer().render(cf.view(), &RenderConfig::default())?;
    assert_eq!(figure.annotations[[0, 0]], "3\n30.00%");
    Ok(())
}

#[test]
fn test_wrong_number_of_group_names_is_ignored() -> Result<(), RenderError> {
    let cf = array![[5.0, 0.0], [1.0, 9.0]];
    let config = RenderConfig::default()
        .with_group_names(vec!["TN", "FP", "FN"])
        .with_percent(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.annotations, strings(array![["5", "0"], ["1", "9"]]));
    Ok(())
}

#[test]
fn test_group_names_prefix_cells() -> Result<(), RenderError> {
    let cf = array![[5.0, 0.0], [1.0, 9.0]];
    let config = RenderConfig::default()
        .with_group_names(vec!["TN", "FP", "FN", "TP"])
        .with_count(false)
        .with_percent(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.annotations, strings(array![["TN", "FP"], ["FN", "TP"]]));
    Ok(())
}

#[test]
fn test_binary_summary_statistics() -> Result<(), RenderError> {
    let cf = array![[50.0, 10.0], [5.0, 35.0]];
    let figure = renderer().render(cf.view(), &RenderConfig::default())?;

    for expected in ["Accuracy=0.850", "Precision=0.778", "Recall=0.875", "F1 Score=0.824"] {
        assert!(figure.x_label.contains(expected), "missing {expected} in {:?}", figure.x_label);
    }
    assert!(figure.x_label.starts_with("Predicted label\n\nAccuracy="));
    Ok(())
}

#[test]
fn test_multiclass_summary_is_accuracy_only() -> Result<(), RenderError> {
    let cf = array![[5.0, 1.0, 0.0], [2.0, 7.0, 1.0], [0.0, 0.0, 4.0]];
    let figure = renderer().render(cf.view(), &RenderConfig::default())?;
    assert_eq!(figure.x_label, "Predicted label\n\nAccuracy=0.800");
    assert!(figure.summary.is_some_and(|s| s.binary.is_none()));
    Ok(())
}

#[test]
fn test_no_ticks_overrides_categories() -> Result<(), RenderError> {
    let cf = array![[5.0, 0.0], [1.0, 9.0]];
    let config = RenderConfig::default()
        .with_categories(Categories::labels(vec!["cat", "dog"]))
        .with_xy_ticks(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert!(figure.x_tick_labels.is_none());
    assert!(figure.y_tick_labels.is_none());
    Ok(())
}

#[test]
fn test_explicit_categories_label_both_axes() -> Result<(), RenderError> {
    let cf = array![[5.0, 0.0], [1.0, 9.0]];
    let config = RenderConfig::default().with_categories(Categories::labels(vec!["cat", "dog"]));
    let figure = renderer().render(cf.view(), &config)?;
    let expected = Some(vec!["cat".to_string(), "dog".to_string()]);
    assert_eq!(figure.x_tick_labels, expected);
    assert_eq!(figure.y_tick_labels, expected);
    Ok(())
}

#[test]
fn test_without_plot_labels_keeps_stats() -> Result<(), RenderError> {
    let cf = array![[50.0, 10.0], [5.0, 35.0]];
    let config = RenderConfig::default().with_xy_plot_labels(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert!(figure.y_label.is_none());
    assert!(!figure.x_label.contains("Predicted label"));
    assert!(figure.x_label.contains("Accuracy=0.850"));
    Ok(())
}

#[test]
fn test_plot_labels_without_stats() -> Result<(), RenderError> {
    let cf = array![[50.0, 10.0], [5.0, 35.0]];
    let config = RenderConfig::default().with_sum_stats(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.y_label.as_deref(), Some("True label"));
    assert_eq!(figure.x_label, "Predicted label");
    Ok(())
}

#[test]
fn test_title_only_when_given() -> Result<(), RenderError> {
    let cf = array![[1.0, 0.0], [0.0, 1.0]];
    let figure = renderer().render(cf.view(), &RenderConfig::default())?;
    assert!(figure.title.is_none());

    let figure = renderer().render(cf.view(), &RenderConfig::default().with_title("Model A"))?;
    assert_eq!(figure.title.as_deref(), Some("Model A"));
    Ok(())
}

#[test]
fn test_mask_hides_cells() -> Result<(), RenderError> {
    let cf = array![[5.0, 0.0], [1.0, 9.0]];
    let mask = array![[true, false], [false, true]];
    let config = RenderConfig::minimal().with_mask(mask.clone());
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.visible, mask);
    assert_eq!(figure.value_range(), (5.0, 9.0));

    let masked = figure.to_svg()?.matches("<rect").count();
    let full = renderer()
        .render(cf.view(), &RenderConfig::minimal())?
        .to_svg()?
        .matches("<rect")
        .count();
    assert_eq!(masked + 2, full);
    Ok(())
}

#[test]
fn test_zero_total_gives_nan_text() -> Result<(), RenderError> {
    let cf = Array2::<f64>::zeros((2, 2));
    let config = RenderConfig::default().with_count(false);
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.annotations[[0, 0]], "NaN%");
    assert!(figure.x_label.contains("Accuracy=NaN"));
    Ok(())
}

#[test]
fn test_config_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let config: RenderConfig = serde_json::from_str(
        r#"{"count": false, "sum_stats": false, "fig_size": [3.0, 2.0], "cmap": "Reds_r"}"#,
    )?;
    let cf = array![[3.0, 1.0], [0.0, 6.0]];
    let figure = renderer().render(cf.view(), &config)?;
    assert_eq!(figure.size, (3.0, 2.0));
    assert_eq!(figure.pixel_size(), (300, 200));
    assert_eq!(figure.colormap.name(), "Reds_r");
    assert_eq!(figure.annotations[[0, 1]], "10.00%");
    Ok(())
}

#[test]
fn test_svg_contains_drawn_text() -> Result<(), RenderError> {
    let cf = array![[50.0, 10.0], [5.0, 35.0]];
    let config = RenderConfig::default()
        .with_group_names(vec!["TN", "FP", "FN", "TP"])
        .with_mask(array![[true, false], [true, true]])
        .with_title("Spam filter")
        .with_cbar(false);
    let svg = renderer().render(cf.view(), &config)?.to_svg()?;

    assert!(svg.contains(">TP<"));
    assert!(svg.contains("35.00%"));
    assert!(svg.contains("True label"));
    assert!(svg.contains("Predicted label"));
    assert!(svg.contains("Accuracy=0.850"));
    assert!(svg.contains("F1 Score=0.824"));
    assert!(svg.contains("Spam filter"));
    // y axis label is drawn vertically
    assert!(svg.contains("rotate(270"));

    // the masked cell leaves no text behind
    assert!(!svg.contains(">FP<"));
    assert!(!svg.contains("10.00%"));
    Ok(())
}
