// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EngineGuard behaviour with deterministic engines

use fabstir_ocr_node::vision::ocr::{EngineGuard, OcrEngine, OcrError, RawOcrOutput};
use image::RgbImage;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::common::{DimensionsEngine, FailingEngine, InFlightEngine};

/// Records the width of every image it sees, in call order
struct OrderRecordingEngine {
    seen: Arc<Mutex<Vec<u32>>>,
    delay: Duration,
}

impl OcrEngine for OrderRecordingEngine {
    fn ocr(&mut self, image: &RgbImage) -> anyhow::Result<RawOcrOutput> {
        self.seen.lock().unwrap().push(image.width());
        std::thread::sleep(self.delay);
        Ok(vec![])
    }
}

#[tokio::test]
async fn test_recognize_flattens_engine_output() {
    let guard = EngineGuard::new(Box::new(DimensionsEngine::new()), None);

    let detections = guard.recognize(RgbImage::new(12, 7)).await.unwrap();

    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].text, "12x7");
    assert_eq!(detections[0].bounding_box[1], [12.0, 0.0]);
}

#[tokio::test]
async fn test_engine_failure_maps_to_engine_error() {
    let guard = EngineGuard::new(Box::new(FailingEngine), None);

    let err = guard.recognize(RgbImage::new(2, 2)).await.unwrap_err();
    assert!(matches!(err, OcrError::Engine(_)));
    assert_eq!(err.to_string(), "inference backend unavailable");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_waiters_are_served_in_arrival_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let guard = Arc::new(EngineGuard::new(
        Box::new(OrderRecordingEngine {
            seen: seen.clone(),
            delay: Duration::from_millis(60),
        }),
        None,
    ));

    let mut handles = Vec::new();
    for width in 1..=4u32 {
        let guard = guard.clone();
        handles.push(tokio::spawn(async move {
            guard.recognize(RgbImage::new(width, 1)).await
        }));
        tokio::time::sleep(Duration::from_millis(15)).await;
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_bounded_wait_fails_with_busy() {
    let engine = InFlightEngine::new(Duration::from_millis(300));
    let current = engine.current.clone();
    let guard = Arc::new(EngineGuard::new(
        Box::new(engine),
        Some(Duration::from_millis(30)),
    ));
    assert_eq!(guard.lock_timeout(), Some(Duration::from_millis(30)));

    let first = tokio::spawn({
        let guard = guard.clone();
        async move { guard.recognize(RgbImage::new(4, 4)).await }
    });

    while current.load(std::sync::atomic::Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let err = guard.recognize(RgbImage::new(4, 4)).await.unwrap_err();
    assert!(matches!(err, OcrError::Busy(bound) if bound == Duration::from_millis(30)));

    // The holder is unaffected and the lock is usable afterwards
    assert_eq!(first.await.unwrap().unwrap().len(), 2);
    assert_eq!(guard.recognize(RgbImage::new(4, 4)).await.unwrap().len(), 2);
}
