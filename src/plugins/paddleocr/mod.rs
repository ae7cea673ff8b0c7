use crate::common_types::{EngineLanguage, LanguageCode};
use crate::errors::AppError;
use crate::plugins::OcrPlugin;
use crate::recognition::{OrientationConfidence, PageImage, RecognitionResult};
use crate::reporter::AppReporter;
use crate::AppResult;
use base64::Engine;
use image::ImageFormat;
use rvstruct::ValueStruct;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

mod lang_map;
pub use lang_map::*;

mod native;
pub use native::*;

mod translate;
pub use translate::*;

pub const PLUGIN_NAME: &str = "paddleocr";

#[derive(Debug, Clone)]
pub struct PaddleOcrOptions {
    /// Serving endpoint for each loaded PaddleOCR language model.
    pub endpoints: BTreeMap<EngineLanguage, Url>,
    pub request_timeout: Duration,
    pub use_textline_orientation: bool,
}

impl PaddleOcrOptions {
    pub const DEFAULT_ENDPOINT: &'static str = "http://127.0.0.1:8080/ocr";
    pub const DEFAULT_ENDPOINT_LANGUAGE: &'static str = "en";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(endpoints: BTreeMap<EngineLanguage, Url>) -> Self {
        Self {
            endpoints,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            use_textline_orientation: true,
        }
    }

    /// Parses `<language>=<url>`. The language may be a pipeline code (`kor`)
    /// or a PaddleOCR one (`korean`).
    pub fn parse_endpoint(value: &str) -> Result<(EngineLanguage, Url), String> {
        let (language, url) = value
            .split_once('=')
            .ok_or_else(|| format!("Expected <language>=<url>, got: {value}"))?;
        let language = to_paddle_language(&LanguageCode::from(language.trim().to_string()))
            .ok_or_else(|| format!("Unknown PaddleOCR language: {language}"))?;
        let url = Url::parse(url.trim()).map_err(|e| format!("Invalid endpoint URL {url}: {e}"))?;
        Ok((language, url))
    }

    /// Parses a comma separated list of `<language>=<url>` pairs.
    pub fn parse_endpoint_list(value: &str) -> Result<BTreeMap<EngineLanguage, Url>, String> {
        value
            .split(',')
            .map(|pair| pair.trim())
            .filter(|pair| !pair.is_empty())
            .map(Self::parse_endpoint)
            .collect()
    }
}

impl Default for PaddleOcrOptions {
    fn default() -> Self {
        Self::new(
            Url::parse(Self::DEFAULT_ENDPOINT)
                .into_iter()
                .map(|url| {
                    (
                        EngineLanguage::from(Self::DEFAULT_ENDPOINT_LANGUAGE.to_string()),
                        url,
                    )
                })
                .collect(),
        )
    }
}

/// Adapter for PaddleOCR running as a serving process.
///
/// PaddleOCR loads one language model per process and uses every core for a
/// single prediction, so this adapter only ever allows one page job at a time.
pub struct PaddleOcrPlugin<'a> {
    client: reqwest::Client,
    options: PaddleOcrOptions,
    reporter: &'a AppReporter<'a>,
    engine_version: OnceLock<String>,
}

impl<'a> PaddleOcrPlugin<'a> {
    const CONCURRENCY_LIMIT: usize = 1;

    pub async fn new(options: PaddleOcrOptions, reporter: &'a AppReporter<'a>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .build()?;
        Ok(Self {
            client,
            options,
            reporter,
            engine_version: OnceLock::new(),
        })
    }

    fn resolve_endpoint(&self, language: &LanguageCode) -> AppResult<(EngineLanguage, &Url)> {
        let unsupported = || AppError::UnsupportedLanguageError {
            plugin: PLUGIN_NAME.to_string(),
            language: language.value().clone(),
        };
        let paddle_language = to_paddle_language(language).ok_or_else(unsupported)?;
        let endpoint = self
            .options
            .endpoints
            .get(&paddle_language)
            .ok_or_else(unsupported)?;
        Ok((paddle_language, endpoint))
    }

    fn health_url(endpoint: &Url) -> Url {
        let mut health_url = endpoint.clone();
        health_url.set_path("/health");
        health_url.set_query(None);
        health_url
    }

    fn encode_page(page: &PageImage) -> AppResult<String> {
        let mut png_image_bytes = std::io::Cursor::new(Vec::new());
        page.image
            .write_to(&mut png_image_bytes, ImageFormat::Png)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(png_image_bytes.into_inner()))
    }

    /// Posts one request. Serving errors come back as a response with a
    /// non-zero `errorCode`, whatever the HTTP status.
    async fn invoke_engine(
        &self,
        endpoint: &Url,
        request: &PaddleOcrServingRequest,
    ) -> AppResult<PaddleOcrServingResponse> {
        let response = self
            .client
            .post(endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::engine_invocation(PLUGIN_NAME, e))?;
        let response_status = response.status();
        let response_bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::engine_invocation(PLUGIN_NAME, e))?;
        if !response_status.is_success() {
            return match serde_json::from_slice::<PaddleOcrServingResponse>(&response_bytes) {
                Ok(serving_error) if serving_error.error_code != 0 => Ok(serving_error),
                _ => Err(AppError::engine_invocation(
                    PLUGIN_NAME,
                    format!(
                        "HTTP status: {response_status}. {}",
                        String::from_utf8_lossy(&response_bytes)
                    ),
                )),
            };
        }
        serde_json::from_slice(&response_bytes).map_err(|e| {
            AppError::result_translation(PLUGIN_NAME, format!("undecodable response: {e}"))
        })
    }
}

impl<'a> OcrPlugin for PaddleOcrPlugin<'a> {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn creator_tag(&self) -> String {
        match self.engine_version.get() {
            Some(engine_version) => format!(
                "PaddleOCR {engine_version} (ocrpipe {})",
                env!("CARGO_PKG_VERSION")
            ),
            None => format!("PaddleOCR serving (ocrpipe {})", env!("CARGO_PKG_VERSION")),
        }
    }

    fn languages(&self) -> BTreeSet<LanguageCode> {
        self.options
            .endpoints
            .keys()
            .flat_map(from_paddle_language)
            .collect()
    }

    /// Accepts PaddleOCR model codes as well as the mapped host codes.
    fn supports_language(&self, language: &LanguageCode) -> bool {
        self.resolve_endpoint(language).is_ok()
    }

    fn report_concurrency_limit(&self) -> usize {
        Self::CONCURRENCY_LIMIT
    }

    async fn warm_up(&self, language: &LanguageCode) -> AppResult<()> {
        let (paddle_language, endpoint) = self.resolve_endpoint(language)?;
        self.reporter.report(format!(
            "Using PaddleOCR '{}' model at {}",
            paddle_language.value(),
            endpoint
        ))?;
        let health_url = Self::health_url(endpoint);
        let response = self
            .client
            .get(health_url.clone())
            .send()
            .await
            .map_err(|e| {
                AppError::engine_invocation(
                    PLUGIN_NAME,
                    format!("serving endpoint {health_url} is not available: {e}"),
                )
            })?;
        if !response.status().is_success() {
            return Err(AppError::engine_invocation(
                PLUGIN_NAME,
                format!(
                    "serving endpoint {health_url} is not healthy. HTTP status: {}",
                    response.status()
                ),
            ));
        }
        // The health body is informational, older servers answer with plain text.
        let health: PaddleOcrHealthResponse = response.json().await.unwrap_or_default();
        if health.error_code != 0 {
            return Err(AppError::engine_invocation(
                PLUGIN_NAME,
                format!(
                    "serving endpoint {health_url} is not healthy. Error code: {}",
                    health.error_code
                ),
            ));
        }
        if let Some(engine_version) = health.version {
            tracing::debug!(engine_version = engine_version.as_str(), "PaddleOCR serving is healthy");
            self.engine_version.get_or_init(|| engine_version);
        }
        Ok(())
    }

    async fn get_orientation(
        &self,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<OrientationConfidence> {
        let (_, endpoint) = self.resolve_endpoint(language)?;
        let request = PaddleOcrServingRequest::for_orientation(Self::encode_page(page)?);
        let response = self.invoke_engine(endpoint, &request).await?;
        translate_orientation(response)
    }

    async fn recognize(
        &self,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<RecognitionResult> {
        let (paddle_language, endpoint) = self.resolve_endpoint(language)?;
        tracing::debug!(
            page = page.page_number,
            language = paddle_language.value().as_str(),
            %endpoint,
            "Running PaddleOCR"
        );
        let request = PaddleOcrServingRequest::for_image(
            Self::encode_page(page)?,
            self.options.use_textline_orientation,
            true,
        );
        let response = self.invoke_engine(endpoint, &request).await?;
        // Word box extraction fails on some pages without text, lines still work.
        let response = if response.error_code != 0 {
            tracing::warn!(
                page = page.page_number,
                error_code = response.error_code,
                "PaddleOCR failed with word boxes, retrying with lines only: {}",
                response.error_msg
            );
            let request = PaddleOcrServingRequest {
                return_word_box: false,
                ..request
            };
            self.invoke_engine(endpoint, &request).await?
        } else {
            response
        };
        translate_response(response, &page.geometry())
    }

    async fn close(self) -> AppResult<()> {
        tracing::debug!("Closing PaddleOCR session");
        Ok(())
    }
}

#[allow(unused_imports)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineOptions;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Recorded request line and JSON body.
    type ServedRequests = Arc<Mutex<Vec<(String, serde_json::Value)>>>;

    /// Local HTTP server answering one connection per canned response, in order.
    async fn start_serving(responses: Vec<(u16, &'static str)>) -> (Url, ServedRequests) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let requests: ServedRequests = Arc::new(Mutex::new(Vec::new()));
        let served = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                served.lock().unwrap().push(request);
                let reply = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });
        (
            Url::parse(&format!("http://{address}/ocr")).unwrap(),
            requests,
        )
    }

    async fn read_request(socket: &mut TcpStream) -> (String, serde_json::Value) {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 16 * 1024];
        let header_end = loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break buffer.len();
            }
            buffer.extend_from_slice(&chunk[..read]);
            if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                break position + 4;
            }
        };
        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buffer.len() < header_end + content_length {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
        }
        let request_line = head.lines().next().unwrap_or_default().to_string();
        let body = serde_json::from_slice(&buffer[header_end..]).unwrap_or(serde_json::Value::Null);
        (request_line, body)
    }

    fn korean_options(endpoint: Url) -> PaddleOcrOptions {
        PaddleOcrOptions::new(
            [(EngineLanguage::from("korean".to_string()), endpoint)]
                .into_iter()
                .collect(),
        )
    }

    fn kor() -> LanguageCode {
        LanguageCode::from("kor".to_string())
    }

    const HEALTHY: &str = r#"{"logId": "h1", "errorCode": 0, "errorMsg": "Healthy", "version": "3.2.0"}"#;

    const KOREAN_PAGE: &str = r#"{
        "logId": "r1",
        "errorCode": 0,
        "errorMsg": "Success",
        "result": {
            "ocrResults": [{
                "prunedResult": {
                    "rec_texts": ["안녕하세요 세계", "바깥"],
                    "rec_scores": [0.97, 0.88],
                    "rec_boxes": [[4, 4, 60, 20], [40, 30, 90, 80]],
                    "text_word": [["안녕하세요", "세계"], ["바깥"]],
                    "text_word_region": [
                        [
                            [[4, 4], [38, 4], [38, 20], [4, 20]],
                            [[40, 4], [60, 4], [60, 20], [40, 20]]
                        ],
                        [[[40, 30], [90, 30], [90, 80], [40, 80]]]
                    ]
                }
            }]
        }
    }"#;

    const WORD_BOX_CRASH: &str =
        r#"{"logId": "e1", "errorCode": 500, "errorMsg": "KeyError: 'text_word_region'"}"#;

    const BLANK_PAGE: &str = r#"{
        "logId": "r2",
        "errorCode": 0,
        "errorMsg": "Success",
        "result": {"ocrResults": [{"prunedResult": {"rec_texts": [], "rec_scores": [], "rec_boxes": []}}]}
    }"#;

    fn unreachable_options() -> PaddleOcrOptions {
        PaddleOcrOptions::new(
            [(
                EngineLanguage::from("korean".to_string()),
                Url::parse("http://127.0.0.1:9/ocr").unwrap(),
            )]
            .into_iter()
            .collect(),
        )
    }

    fn blank_page() -> PageImage {
        PageImage::new(
            0,
            image::DynamicImage::new_rgb8(64, 64),
            300.0,
        )
    }

    #[tokio::test]
    async fn test_concurrency_limit_is_one() -> AppResult<()> {
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(PaddleOcrOptions::default(), &reporter).await?;
        assert_eq!(plugin.report_concurrency_limit(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_check_options_forces_single_job() -> AppResult<()> {
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(PaddleOcrOptions::default(), &reporter).await?;
        let mut options = PipelineOptions::for_plugin(PLUGIN_NAME);
        options.jobs = 8;
        plugin.check_options(&mut options);
        assert_eq!(options.jobs, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_language_is_unsupported() -> AppResult<()> {
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(unreachable_options(), &reporter).await?;
        let result = plugin
            .recognize(&blank_page(), &LanguageCode::from("xyz".to_string()))
            .await;
        assert!(matches!(
            result,
            Err(AppError::UnsupportedLanguageError { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_language_without_endpoint_is_unsupported() -> AppResult<()> {
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(unreachable_options(), &reporter).await?;
        let result = plugin
            .warm_up(&LanguageCode::from("eng".to_string()))
            .await;
        assert!(matches!(
            result,
            Err(AppError::UnsupportedLanguageError { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_invocation_error() -> AppResult<()> {
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(unreachable_options(), &reporter).await?;
        let result = plugin
            .recognize(&blank_page(), &LanguageCode::from("kor".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::EngineInvocationError { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_languages_follow_endpoints() -> AppResult<()> {
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(unreachable_options(), &reporter).await?;
        let languages = plugin.languages();
        assert_eq!(languages.len(), 1);
        assert!(languages.contains(&LanguageCode::from("kor".to_string())));
        assert!(plugin.supports_language(&LanguageCode::from("kor".to_string())));
        assert!(plugin.supports_language(&LanguageCode::from("korean".to_string())));
        assert!(!plugin.supports_language(&LanguageCode::from("eng".to_string())));
        Ok(())
    }

    #[test]
    fn test_parse_endpoint() {
        let (language, url) =
            PaddleOcrOptions::parse_endpoint("kor=http://localhost:8081/ocr").unwrap();
        assert_eq!(language.value(), "korean");
        assert_eq!(url.as_str(), "http://localhost:8081/ocr");

        assert!(PaddleOcrOptions::parse_endpoint("http://localhost:8081/ocr").is_err());
        assert!(PaddleOcrOptions::parse_endpoint("xyz=http://localhost/ocr").is_err());

        let endpoints = PaddleOcrOptions::parse_endpoint_list(
            "en=http://localhost:8080/ocr, korean=http://localhost:8081/ocr",
        )
        .unwrap();
        assert_eq!(endpoints.len(), 2);
    }

    #[test]
    fn test_health_url() {
        let endpoint = Url::parse("http://localhost:8080/ocr?x=1").unwrap();
        assert_eq!(
            PaddleOcrPlugin::health_url(&endpoint).as_str(),
            "http://localhost:8080/health"
        );
    }

    #[tokio::test]
    #[cfg_attr(not(feature = "ci-paddleocr"), ignore)]
    async fn test_recognize_blank_page_with_serving() -> Result<(), Box<dyn std::error::Error>> {
        let reporter = AppReporter::silent();
        let endpoints = PaddleOcrOptions::parse_endpoint_list(
            std::env::var("TEST_PADDLEOCR_ENDPOINTS")
                .expect("TEST_PADDLEOCR_ENDPOINTS required")
                .as_str(),
        )?;
        let plugin = PaddleOcrPlugin::new(PaddleOcrOptions::new(endpoints), &reporter).await?;
        let language = LanguageCode::from("eng".to_string());
        plugin.warm_up(&language).await?;
        let page = PageImage::new(
            0,
            image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
                612,
                792,
                image::Rgb([255, 255, 255]),
            )),
            300.0,
        );
        let result = plugin.recognize(&page, &language).await?;
        assert_eq!(result.spans().count(), 0);
        assert_eq!(result.page.width, 612);
        Ok(())
    }

    #[tokio::test]
    async fn test_recognize_with_canned_serving() -> AppResult<()> {
        let (endpoint, requests) = start_serving(vec![(200, HEALTHY), (200, KOREAN_PAGE)]).await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        plugin.warm_up(&kor()).await?;
        assert!(plugin.creator_tag().starts_with("PaddleOCR 3.2.0 (ocrpipe "));

        let result = plugin.recognize(&blank_page(), &kor()).await?;
        assert_eq!(result.text, "안녕하세요 세계\n바깥");
        let words: Vec<&str> = result.spans().map(|span| span.text.as_str()).collect();
        assert_eq!(words, vec!["안녕하세요", "세계", "바깥"]);
        assert!(result
            .spans()
            .all(|span| span.bbox.is_within(64.0, 64.0)));
        assert!(result.lines.iter().all(|line| line.bbox.is_within(64.0, 64.0)));

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].0.starts_with("GET /health "));
        let (request_line, body) = &requests[1];
        assert!(request_line.starts_with("POST /ocr "));
        assert_eq!(body["fileType"], 1);
        assert_eq!(body["returnWordBox"], true);
        assert_eq!(body["useDocOrientationClassify"], false);
        assert_eq!(body["useTextlineOrientation"], true);
        assert_eq!(body["visualize"], false);
        let png = base64::engine::general_purpose::STANDARD
            .decode(body["file"].as_str().unwrap_or_default())
            .unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        Ok(())
    }

    #[tokio::test]
    async fn test_word_box_failure_retries_with_lines_only() -> AppResult<()> {
        let (endpoint, requests) =
            start_serving(vec![(500, WORD_BOX_CRASH), (200, BLANK_PAGE)]).await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;

        let result = plugin.recognize(&blank_page(), &kor()).await?;
        assert_eq!(result.spans().count(), 0);
        assert_eq!(result.page.width, 64);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].1["returnWordBox"], true);
        assert_eq!(requests[1].1["returnWordBox"], false);
        assert_eq!(requests[0].1["file"], requests[1].1["file"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_retry_is_engine_error() -> AppResult<()> {
        let (endpoint, requests) =
            start_serving(vec![(500, WORD_BOX_CRASH), (500, WORD_BOX_CRASH)]).await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        let result = plugin.recognize(&blank_page(), &kor()).await;
        assert!(matches!(result, Err(AppError::EngineInvocationError { .. })));
        assert_eq!(requests.lock().unwrap().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_http_error_is_engine_error() -> AppResult<()> {
        let (endpoint, requests) = start_serving(vec![(500, "Internal Server Error")]).await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        match plugin.recognize(&blank_page(), &kor()).await {
            Err(AppError::EngineInvocationError { message, .. }) => {
                assert!(message.contains("500"));
            }
            other => panic!("Unexpected result: {other:?}"),
        }
        assert_eq!(requests.lock().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_undecodable_response_is_translation_error() -> AppResult<()> {
        let (endpoint, _) = start_serving(vec![(200, "<html>proxy login</html>")]).await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        let result = plugin.recognize(&blank_page(), &kor()).await;
        assert!(matches!(
            result,
            Err(AppError::ResultTranslationError { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_orientation_with_canned_serving() -> AppResult<()> {
        let (endpoint, requests) = start_serving(vec![(
            200,
            r#"{
                "logId": "o1",
                "errorCode": 0,
                "errorMsg": "Success",
                "result": {"ocrResults": [{"prunedResult": {
                    "rec_texts": [],
                    "doc_preprocessor_res": {"angle": 90, "score": 0.92}
                }}]}
            }"#,
        )])
        .await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        let orientation = plugin.get_orientation(&blank_page(), &kor()).await?;
        assert_eq!(orientation.angle, 90);
        assert!((orientation.confidence - 13.8).abs() < 1e-3);

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].1["useDocOrientationClassify"], true);
        assert_eq!(requests[0].1["returnWordBox"], false);
        Ok(())
    }

    #[tokio::test]
    async fn test_warm_up_health_check() -> AppResult<()> {
        let (endpoint, _) = start_serving(vec![(200, "ok")]).await;
        let reporter = AppReporter::silent();
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        plugin.warm_up(&kor()).await?;
        assert!(plugin.creator_tag().starts_with("PaddleOCR serving (ocrpipe "));

        let (endpoint, _) = start_serving(vec![(503, "")]).await;
        let plugin = PaddleOcrPlugin::new(korean_options(endpoint), &reporter).await?;
        assert!(matches!(
            plugin.warm_up(&kor()).await,
            Err(AppError::EngineInvocationError { .. })
        ));
        Ok(())
    }
}
