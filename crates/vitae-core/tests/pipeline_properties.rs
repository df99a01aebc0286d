//! Build pipeline behaviour against mocked ports.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use mockall::{Sequence, mock};

use vitae_core::prelude::*;

mock! {
    pub Source {}
    #[async_trait]
    impl DataSource for Source {
        async fn load_data(&self) -> VitaeResult<Record>;
    }
}

mock! {
    pub Engine {}
    #[async_trait]
    impl TemplateEngine for Engine {
        async fn render(&self, template: &TemplateId, record: &Record) -> VitaeResult<Markup>;
    }
}

mock! {
    pub Renderer {}
    #[async_trait]
    impl DocumentRenderer for Renderer {
        async fn generate(&self, markup: &Markup, output_path: &Path) -> VitaeResult<()>;
    }
}

struct FixedClock(NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

fn scenario_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 2)
        .unwrap()
        .and_hms_opt(8, 15, 30)
        .unwrap()
}

fn record_named(name: &str) -> Record {
    let mut profile = Mapping::new();
    profile.insert("name".into(), name.into());
    Record::new().with("profile", profile)
}

fn ada() -> Record {
    record_named("Ada Lovelace")
}

fn template(id: &str) -> TemplateId {
    TemplateId::new(id).unwrap()
}

fn service(source: MockSource, engine: MockEngine, renderer: MockRenderer) -> BuildService {
    BuildService::new(
        Box::new(source),
        Box::new(engine),
        Box::new(renderer),
        Box::new(FixedClock(scenario_time())),
    )
    .with_output_dir("out")
}

#[tokio::test]
async fn stages_run_once_each_in_order() {
    let mut seq = Sequence::new();
    let mut source = MockSource::new();
    let mut engine = MockEngine::new();
    let mut renderer = MockRenderer::new();

    source
        .expect_load_data()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(ada()));
    engine
        .expect_render()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(Markup::from("<html>ada</html>")));
    renderer
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let report = service(source, engine, renderer)
        .build(&template("ats"))
        .await
        .unwrap();

    assert_eq!(report.state, PipelineState::Done);
    assert_eq!(report.subject_name, "Ada Lovelace");
    assert_eq!(report.markup_bytes, 16);
    assert_eq!(
        report.output_path,
        PathBuf::from("out").join("CV-Ats_Ada-Lovelace_20240302T081530.pdf")
    );
}

#[tokio::test]
async fn ports_receive_the_expected_arguments() {
    let mut source = MockSource::new();
    let mut engine = MockEngine::new();
    let mut renderer = MockRenderer::new();

    source.expect_load_data().returning(|| Ok(ada()));
    engine
        .expect_render()
        .withf(|template, record| template.as_str() == "creative" && *record == ada())
        .times(1)
        .returning(|_, _| Ok(Markup::from("<p>rendered</p>")));
    renderer
        .expect_generate()
        .withf(|markup, path| {
            markup.as_str() == "<p>rendered</p>"
                && path == Path::new("out/CV-Creative_Ada-Lovelace_20240302T081530.pdf")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    service(source, engine, renderer)
        .build(&template("creative"))
        .await
        .unwrap();
}

#[tokio::test]
async fn data_source_failure_skips_later_stages() {
    let mut source = MockSource::new();
    let mut engine = MockEngine::new();
    let mut renderer = MockRenderer::new();

    source.expect_load_data().times(1).returning(|| {
        Err(ApplicationError::DataUnavailable {
            reason: "no YAML files found in ./data".into(),
        }
        .into())
    });
    engine.expect_render().never();
    renderer.expect_generate().never();

    let err = service(source, engine, renderer)
        .build(&template("creative"))
        .await
        .unwrap_err();

    assert_eq!(
        err.failed_state(),
        Some(PipelineState::Failed {
            at: PipelineStage::Loading
        })
    );
    assert!(matches!(
        err.root(),
        VitaeError::Application(ApplicationError::DataUnavailable { .. })
    ));
}

#[tokio::test]
async fn missing_subject_name_fails_before_rendering() {
    for record in [
        Record::new(),
        record_named(""),
        record_named("   "),
        Record::new().with("profile", "not a mapping"),
    ] {
        let mut source = MockSource::new();
        let mut engine = MockEngine::new();
        let mut renderer = MockRenderer::new();

        source
            .expect_load_data()
            .times(1)
            .returning(move || Ok(record.clone()));
        engine.expect_render().never();
        renderer.expect_generate().never();

        let err = service(source, engine, renderer)
            .build(&template("ats"))
            .await
            .unwrap_err();

        assert_eq!(
            err.failed_state(),
            Some(PipelineState::Failed {
                at: PipelineStage::Loading
            })
        );
        assert!(
            matches!(
                err.root(),
                VitaeError::Domain(DomainError::MissingSubjectName { field: "profile.name" })
            ),
            "unexpected error: {err:?}"
        );
    }
}

#[tokio::test]
async fn unknown_template_never_reaches_renderer() {
    let mut source = MockSource::new();
    let mut engine = MockEngine::new();
    let mut renderer = MockRenderer::new();

    source.expect_load_data().times(1).returning(|| Ok(ada()));
    engine.expect_render().times(1).returning(|template, _| {
        Err(ApplicationError::TemplateNotFound {
            template: template.to_string(),
            available: vec!["ats".into(), "creative".into()],
        }
        .into())
    });
    renderer.expect_generate().never();

    let err = service(source, engine, renderer)
        .build(&template("nonexistent"))
        .await
        .unwrap_err();

    assert_eq!(
        err.failed_state(),
        Some(PipelineState::Failed {
            at: PipelineStage::Rendering
        })
    );
    match err.into_root() {
        VitaeError::Application(ApplicationError::TemplateNotFound { template, .. }) => {
            assert_eq!(template, "nonexistent");
        }
        other => panic!("expected TemplateNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn renderer_failure_is_propagated() {
    let mut source = MockSource::new();
    let mut engine = MockEngine::new();
    let mut renderer = MockRenderer::new();

    source.expect_load_data().times(1).returning(|| Ok(ada()));
    engine
        .expect_render()
        .times(1)
        .returning(|_, _| Ok(Markup::from("<html/>")));
    renderer.expect_generate().times(1).returning(|_, path| {
        Err(ApplicationError::RenderFailed {
            path: path.to_path_buf(),
            reason: "browser exited with status 1".into(),
        }
        .into())
    });

    let err = service(source, engine, renderer)
        .build(&template("ats"))
        .await
        .unwrap_err();

    assert_eq!(
        err.failed_state(),
        Some(PipelineState::Failed {
            at: PipelineStage::Emitting
        })
    );
    assert!(matches!(
        err.root(),
        VitaeError::Application(ApplicationError::RenderFailed { .. })
    ));
    assert!(err.to_string().contains("CV-Ats_Ada-Lovelace_20240302T081530.pdf"));
}

#[tokio::test]
async fn default_output_dir_is_relative_filename() {
    let mut source = MockSource::new();
    let mut engine = MockEngine::new();
    let mut renderer = MockRenderer::new();

    source.expect_load_data().returning(|| Ok(record_named("  jane   doe ")));
    engine.expect_render().returning(|_, _| Ok(Markup::default()));
    renderer.expect_generate().returning(|_, _| Ok(()));

    let service = BuildService::new(
        Box::new(source),
        Box::new(engine),
        Box::new(renderer),
        Box::new(FixedClock(scenario_time())),
    );
    let report = service.build(&template("creative")).await.unwrap();

    assert_eq!(
        report.output_path,
        PathBuf::from("CV-Creative_Jane-Doe_20240302T081530.pdf")
    );
}
