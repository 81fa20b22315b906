//! API route handlers.
//!
//! Every stage failure is caught here and mapped into the flat
//! `{error: message}` envelope; no fault propagates past the handler
//! boundary.

use axum::extract::{Form, Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use dataset::{DataFrame, Preview};
use serde::{Deserialize, Serialize};
use trainer::{ConfusionMatrix, ModelKind};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub preview: Preview,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PreprocessRequest {
    #[serde(default)]
    pub standardize: bool,
    #[serde(default)]
    pub normalize: bool,
    pub target_col: String,
}

#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    pub test_size: f64,
    pub target_col: String,
    /// Optional override of the configured split seed
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SplitResponse {
    pub train_shape: (usize, usize),
    pub test_shape: (usize, usize),
}

#[derive(Debug, Deserialize)]
pub struct TrainRequest {
    pub model_name: String,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub model: String,
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub histogram_base64: String,
}

fn ok_json<T: Serialize>(value: T) -> Response {
    Json(value).into_response()
}

fn error_json(message: impl Into<String>) -> Response {
    Json(ErrorResponse {
        error: message.into(),
    })
    .into_response()
}

/// `POST /upload` - parse a CSV payload into the session, replacing any
/// previous dataset and invalidating its split
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let content = match read_file_field(&mut multipart).await {
        Ok(content) => content,
        Err(message) => return error_json(message),
    };

    match DataFrame::from_csv_bytes(&content) {
        Ok(frame) => {
            let preview = frame.preview(10);
            let (rows, cols) = frame.shape();
            tracing::info!(rows, cols, "dataset uploaded");
            state.workflow.write().await.replace_dataset(frame);
            ok_json(UploadResponse { preview })
        }
        Err(e) => error_json(e.to_string()),
    }
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, String> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| format!("Malformed multipart request: {e}"))?;
        match field {
            Some(field) if field.name() == Some("file") => {
                return field
                    .bytes()
                    .await
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| format!("Failed to read upload: {e}"));
            }
            Some(_) => continue,
            None => return Err("Missing 'file' field in upload".to_string()),
        }
    }
}

/// `POST /preprocess` - rescale the stored dataset's feature columns in place
pub async fn preprocess(
    State(state): State<AppState>,
    Form(req): Form<PreprocessRequest>,
) -> Response {
    let mut guard = state.workflow.write().await;
    let Some(frame) = guard.dataset_mut() else {
        return error_json("Upload dataset first");
    };

    let opts = pipeline::PreprocessOptions {
        standardize: req.standardize,
        normalize: req.normalize,
    };
    match pipeline::preprocess(frame, &req.target_col, &opts) {
        Ok(()) => {
            tracing::info!(
                standardize = req.standardize,
                normalize = req.normalize,
                target = %req.target_col,
                "dataset preprocessed"
            );
            ok_json(MessageResponse {
                message: "Preprocessing done".to_string(),
            })
        }
        Err(e) => error_json(e.to_string()),
    }
}

/// `POST /split` - partition the stored dataset into train/holdout subsets
pub async fn split(State(state): State<AppState>, Form(req): Form<SplitRequest>) -> Response {
    let seed = req.seed.unwrap_or(state.config.split_seed);
    let mut guard = state.workflow.write().await;

    let split = {
        let Some(frame) = guard.dataset() else {
            return error_json("Upload dataset first");
        };
        match trainer::train_test_split(frame, &req.target_col, req.test_size, seed) {
            Ok(split) => split,
            Err(e) => return error_json(e.to_string()),
        }
    };

    let response = SplitResponse {
        train_shape: split.train_shape(),
        test_shape: split.test_shape(),
    };
    tracing::info!(
        train_rows = response.train_shape.0,
        test_rows = response.test_shape.0,
        seed,
        "dataset split"
    );
    guard.store_split(split);
    ok_json(response)
}

/// `POST /train` - fit the selected classifier on the stored split and
/// report holdout accuracy, a confusion matrix and a prediction histogram
pub async fn train(State(state): State<AppState>, Form(req): Form<TrainRequest>) -> Response {
    let guard = state.workflow.read().await;
    let Some(split) = guard.split() else {
        return error_json("Split dataset first");
    };

    let kind = ModelKind::from_name(&req.model_name);
    let report = match trainer::train_and_evaluate(split, kind) {
        Ok(report) => report,
        Err(e) => return error_json(e.to_string()),
    };

    let histogram =
        match trainer::plot::prediction_histogram_base64(&report.predictions, &split.classes) {
            Ok(encoded) => encoded,
            Err(e) => return error_json(e.to_string()),
        };

    tracing::info!(model = %report.model, accuracy = report.accuracy, "model trained");
    ok_json(TrainResponse {
        model: report.model.to_string(),
        accuracy: report.accuracy,
        confusion_matrix: report.confusion,
        histogram_base64: histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app_state() -> AppState {
        AppState::new(Config::default())
    }

    async fn seed_dataset(state: &AppState) {
        let csv = "x1,x2,y\n1,1,0\n2,1,0\n3,2,0\n7,8,1\n8,9,1\n9,9,1\n1,2,0\n8,8,1\n2,2,0\n9,8,1\n";
        let frame = DataFrame::from_csv_bytes(csv.as_bytes()).unwrap();
        state.workflow.write().await.replace_dataset(frame);
    }

    #[tokio::test]
    async fn preprocess_before_upload_is_rejected() {
        let state = app_state();
        let req = PreprocessRequest {
            standardize: true,
            normalize: false,
            target_col: "y".to_string(),
        };
        let body = body_json(preprocess(State(state.clone()), Form(req)).await).await;
        assert_eq!(body["error"], "Upload dataset first");
        assert!(state.workflow.read().await.dataset().is_none());
    }

    #[tokio::test]
    async fn split_before_upload_is_rejected() {
        let state = app_state();
        let req = SplitRequest {
            test_size: 0.2,
            target_col: "y".to_string(),
            seed: None,
        };
        let body = body_json(split(State(state.clone()), Form(req)).await).await;
        assert_eq!(body["error"], "Upload dataset first");
        assert!(state.workflow.read().await.split().is_none());
    }

    #[tokio::test]
    async fn train_before_split_is_rejected() {
        let state = app_state();
        seed_dataset(&state).await;
        let req = TrainRequest {
            model_name: "logistic".to_string(),
        };
        let body = body_json(train(State(state), Form(req)).await).await;
        assert_eq!(body["error"], "Split dataset first");
    }

    #[tokio::test]
    async fn preprocess_unknown_target_is_rejected() {
        let state = app_state();
        seed_dataset(&state).await;
        let req = PreprocessRequest {
            standardize: true,
            normalize: false,
            target_col: "nope".to_string(),
        };
        let body = body_json(preprocess(State(state), Form(req)).await).await;
        assert_eq!(body["error"], "Invalid target column");
    }

    #[tokio::test]
    async fn full_stage_sequence_succeeds() {
        let state = app_state();
        seed_dataset(&state).await;

        let body = body_json(
            preprocess(
                State(state.clone()),
                Form(PreprocessRequest {
                    standardize: true,
                    normalize: true,
                    target_col: "y".to_string(),
                }),
            )
            .await,
        )
        .await;
        assert_eq!(body["message"], "Preprocessing done");

        let body = body_json(
            split(
                State(state.clone()),
                Form(SplitRequest {
                    test_size: 0.2,
                    target_col: "y".to_string(),
                    seed: None,
                }),
            )
            .await,
        )
        .await;
        assert_eq!(body["train_shape"], serde_json::json!([8, 2]));
        assert_eq!(body["test_shape"], serde_json::json!([2, 2]));

        let body = body_json(
            train(
                State(state.clone()),
                Form(TrainRequest {
                    model_name: "anything-else".to_string(),
                }),
            )
            .await,
        )
        .await;
        assert_eq!(body["model"], "decision_tree");
        let accuracy = body["accuracy"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
        assert!(!body["histogram_base64"].as_str().unwrap().is_empty());
        assert_eq!(
            body["confusion_matrix"]["labels"],
            serde_json::json!(["0", "1"])
        );
    }

    #[tokio::test]
    async fn train_repeats_on_an_unchanged_split() {
        let state = app_state();
        seed_dataset(&state).await;
        body_json(
            split(
                State(state.clone()),
                Form(SplitRequest {
                    test_size: 0.2,
                    target_col: "y".to_string(),
                    seed: Some(7),
                }),
            )
            .await,
        )
        .await;

        for model_name in ["logistic", "tree", "logistic"] {
            let body = body_json(
                train(
                    State(state.clone()),
                    Form(TrainRequest {
                        model_name: model_name.to_string(),
                    }),
                )
                .await,
            )
            .await;
            assert!(
                body["accuracy"].as_f64().is_some(),
                "{model_name} failed: {body}"
            );
        }
    }

    #[tokio::test]
    async fn upload_resets_split_state() {
        let state = app_state();
        seed_dataset(&state).await;
        body_json(
            split(
                State(state.clone()),
                Form(SplitRequest {
                    test_size: 0.2,
                    target_col: "y".to_string(),
                    seed: None,
                }),
            )
            .await,
        )
        .await;
        assert!(state.workflow.read().await.split().is_some());

        // a second upload drops the stale partition
        seed_dataset(&state).await;
        assert!(state.workflow.read().await.split().is_none());

        let body = body_json(
            train(
                State(state),
                Form(TrainRequest {
                    model_name: "logistic".to_string(),
                }),
            )
            .await,
        )
        .await;
        assert_eq!(body["error"], "Split dataset first");
    }
}
