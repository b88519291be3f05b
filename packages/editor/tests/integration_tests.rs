//! End-to-end editing scenarios across all four views

use docsync_editor::document::{codec, DocumentProfile, FieldPath, FieldType, Spacing};
use docsync_editor::views::visual::VisualLayout;
use docsync_editor::{
    ChartProfile, EditSession, EditorConfig, EditorKind, ImportError, MetricStructureProfile,
    SummaryProfile, ViewError, VisualAction,
};
use serde_json::json;

fn config() -> EditorConfig {
    EditorConfig::default()
}

#[test]
fn test_chart_axis_label_edit() -> anyhow::Result<()> {
    let mut session = EditSession::new(ChartProfile, None, config())?;

    session.store_mut().set_field(0, "x_axis.label", json!("Time"))?;

    let doc = session.store().document();
    assert_eq!(
        doc,
        &json!([{
            "chart_type": "line",
            "title": "Chart 1",
            "data_source": "data_source",
            "x_axis": {"field": "x", "label": "Time"},
            "y_axis": {"field": "y", "label": "Y-Axis"}
        }])
    );
    assert_eq!(&codec::decode(&session.text_panel().text)?, doc);
    Ok(())
}

#[test]
fn test_open_map_add_field() -> anyhow::Result<()> {
    let mut session = EditSession::new(
        MetricStructureProfile,
        Some(json!({"total_customers": "integer"})),
        config(),
    )?;

    session.dispatch(VisualAction::AddEntry)?;

    let map = session.store().document().as_object().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("total_customers"), Some(&json!("integer")));
    assert_eq!(map.get("new_property_1"), Some(&json!("string")));
    Ok(())
}

#[test]
fn test_invalid_text_is_stale_but_safe() -> anyhow::Result<()> {
    let mut session = EditSession::new(SummaryProfile, None, config())?;
    let before = session.store().document().clone();

    assert!(!session.edit_text("{ invalid").is_committed());

    assert!(!session.is_valid());
    assert!(session.text_panel().validity.error.is_some());
    assert_eq!(session.store().document(), &before);
    assert_eq!(session.committed_value(), None);

    assert!(!session.format());
    assert_eq!(session.text_panel().text, "{ invalid");

    // the other views keep showing the last valid document
    let VisualLayout::Groups(controls) = session.visual() else {
        panic!("Expected groups");
    };
    assert_eq!(controls.len(), SummaryProfile.fields().len());
    assert!(!session.properties().is_empty());
    Ok(())
}

#[test]
fn test_reset_after_mutations() -> anyhow::Result<()> {
    for kind in EditorKind::ALL {
        let profile = kind.profile();
        let default = profile.default_document();
        let mut session = EditSession::new(profile, None, config())?;

        session.clear()?;
        session.edit_text("garbage");
        session.reset()?;

        assert_eq!(session.store().document(), &default, "{kind} reset");
        assert!(session.is_valid());
    }
    Ok(())
}

#[test]
fn test_rename_collision_policy() -> anyhow::Result<()> {
    let mut session = EditSession::new(MetricStructureProfile, None, config())?;
    let before = session.store().raw_text().to_string();

    let result = session.dispatch(VisualAction::RenameEntry {
        from: "period".to_string(),
        to: "total_customers".to_string(),
    });

    assert!(matches!(result, Err(ViewError::Mutation(_))));
    assert_eq!(session.store().raw_text(), before);

    session.dispatch(VisualAction::RenameEntry {
        from: "period".to_string(),
        to: "reporting_period".to_string(),
    })?;
    assert_eq!(session.store().document()["reporting_period"], json!("string"));
    assert!(session.store().document().get("period").is_none());
    Ok(())
}

#[test]
fn test_import_rejects_invalid_content() -> anyhow::Result<()> {
    let mut session = EditSession::new(ChartProfile, None, config())?;
    session.dispatch(VisualAction::AddRecord)?;

    let doc = session.store().document().clone();
    let raw = session.store().raw_text().to_string();

    let err = session.import_text(r#"{"chart_type": "bar"}"#).unwrap_err();
    assert!(matches!(err, ImportError::Decode(_)));

    assert_eq!(session.store().document(), &doc);
    assert_eq!(session.store().raw_text(), raw);
    Ok(())
}

#[tokio::test]
async fn test_import_file_then_export_round_trip() -> anyhow::Result<()> {
    let mut session = EditSession::new(MetricStructureProfile, None, config())?;
    let content = r#"{"orders":"integer","aov":"float"}"#.to_string();

    session
        .import_file(async move { Ok::<_, std::io::Error>(content) })
        .await?;
    assert_eq!(
        FieldType::from_value(&session.store().document()["aov"]),
        Some(FieldType::Float)
    );

    let artifact = session.export();
    assert_eq!(artifact.bytes, br#"{"orders":"integer","aov":"float"}"#);

    assert!(session.format());
    assert_eq!(
        session.export().bytes,
        codec::serialize(session.store().document(), Spacing::pretty()).into_bytes()
    );
    Ok(())
}

#[test]
fn test_structural_edits_from_every_view_round_trip() -> anyhow::Result<()> {
    let mut session = EditSession::new(ChartProfile, None, config())?;

    session.dispatch(VisualAction::AddRecord)?;
    session.dispatch(VisualAction::Select {
        item: 1,
        path: "chart_type".to_string(),
        option: "pie".to_string(),
    })?;
    session.edit_property(1, &FieldPath::nested("y_axis", "label"), "Revenue")?;
    session.dispatch(VisualAction::SetText {
        item: 0,
        path: "data_source".to_string(),
        value: "orders".to_string(),
    })?;

    let doc = session.store().document().clone();
    for spacing in [Spacing::pretty(), Spacing::Minified] {
        assert_eq!(codec::decode(&codec::serialize(&doc, spacing))?, doc);
    }

    assert_eq!(doc[1]["chart_type"], json!("pie"));
    assert_eq!(doc[1]["y_axis"]["label"], json!("Revenue"));
    assert_eq!(doc[0]["data_source"], json!("orders"));

    assert!(session.minify());
    assert!(!session.text_panel().text.contains('\n'));
    assert_eq!(session.store().document(), &doc);
    Ok(())
}

#[test]
fn test_metric_structure_values_stay_type_tags() -> anyhow::Result<()> {
    let mut session = EditSession::new(MetricStructureProfile, None, config())?;
    let before = session.store().document().clone();

    let nested = session.edit_property(0, &FieldPath::nested("period", "x"), "string");
    assert!(matches!(nested, Err(ViewError::Unsupported { .. })));

    let text = session.dispatch(VisualAction::SetText {
        item: 0,
        path: "period".to_string(),
        value: "hello".to_string(),
    });
    assert!(matches!(text, Err(ViewError::Unsupported { .. })));

    assert_eq!(session.store().document(), &before);
    for value in session.store().document().as_object().unwrap().values() {
        assert!(FieldType::from_value(value).is_some(), "{value} is not a type tag");
    }
    Ok(())
}

#[test]
fn test_hydrated_text_is_kept_verbatim() -> anyhow::Result<()> {
    let config = EditorConfig {
        indent: 4,
        ..EditorConfig::default()
    };
    let mut session = EditSession::from_text(MetricStructureProfile, r#"{"a":"string"}"#, config)?;

    assert_eq!(session.text_panel().text, r#"{"a":"string"}"#);

    session.dispatch(VisualAction::AddEntry)?;
    assert_eq!(
        session.text_panel().text,
        "{\n    \"a\": \"string\",\n    \"new_property_1\": \"string\"\n}"
    );
    Ok(())
}
