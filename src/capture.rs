//! Headless Chrome capture for visual evidence
//!
//! Owns a single browser instance and the task polling its DevTools
//! protocol handler. With two or three polite workers there is nothing for
//! a browser pool to parallelize, so one shared instance is enough.

use crate::{create_browser_config, Config, ScanError};
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info};

pub struct CaptureService {
    browser: Arc<Mutex<Browser>>,
    handler: tokio::task::JoinHandle<()>,
    viewport_width: u32,
    viewport_height: u32,
    device_scale_factor: f64,
    capture_timeout: Duration,
}

impl CaptureService {
    /// Launch the browser and start the protocol handler task
    pub async fn new(config: &Config) -> Result<Self, ScanError> {
        let browser_config = create_browser_config(config);

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScanError::BrowserLaunchFailed(e.to_string()))?;

        // The handler implements Stream and must be polled for the browser
        // to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::error!("browser handler error: {}", e);
                    break;
                }
            }
            debug!("browser handler stream ended");
        });

        info!("headless browser launched");

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            handler: handler_task,
            viewport_width: config.viewport.width,
            viewport_height: config.viewport.height,
            device_scale_factor: config.viewport.device_scale_factor,
            capture_timeout: config.screenshot_timeout,
        })
    }

    /// Render `url` and return PNG bytes, bounded by the capture timeout
    pub async fn capture(&self, url: &str) -> Result<Vec<u8>, ScanError> {
        match timeout(self.capture_timeout, self.capture_inner(url)).await {
            Ok(result) => result,
            Err(_) => Err(ScanError::Timeout(self.capture_timeout)),
        }
    }

    async fn capture_inner(&self, url: &str) -> Result<Vec<u8>, ScanError> {
        let page = {
            let browser = self.browser.lock().await;
            browser
                .new_page(url)
                .await
                .map_err(|e| ScanError::PageError(e.to_string()))?
        };

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(self.viewport_width)
            .height(self.viewport_height)
            .device_scale_factor(self.device_scale_factor)
            .mobile(false)
            .build()
            .map_err(|e| ScanError::PageError(e.to_string()))?;

        page.execute(metrics)
            .await
            .map_err(|e| ScanError::PageError(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScanError::PageError(e.to_string()))?;

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        let result = page
            .screenshot(params)
            .await
            .map_err(|e| ScanError::CaptureFailed(e.to_string()));

        let _ = page.close().await;

        result
    }

    pub async fn shutdown(&self) {
        let _ = self.browser.lock().await.close().await;
        self.handler.abort();
        info!("headless browser stopped");
    }
}
