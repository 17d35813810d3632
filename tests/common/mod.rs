// Common test utilities and fixtures

use std::path::PathBuf;
use tempfile::TempDir;
use webseek::{BrowserType, LocatorConfig, Session, WebDriverBackend};

/// Fixture pages for the resolution tests
pub mod fixtures {
    pub const LOGIN_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head><title>Login</title></head>
    <body>
        <h1>Welcome</h1>
        <form id="login">
            <label for="pwd">Password</label>
            <input id="pwd" name="pwd" type="password">
            <label>Email <input id="email" name="email" type="email"></label>
            <input name="Password" type="text" id="decoy">
            <label><input type="checkbox" name="remember" id="remember"> Remember me</label>
            <button type="submit" id="sign-in" onclick="event.preventDefault(); document.getElementById('status').textContent='Signed in'">Sign in</button>
        </form>
        <form id="signup">
            <label for="signup-email">Email</label>
            <input id="signup-email" name="signup-email">
            <input type="checkbox" name="agree" id="agree" checked>
            <button id="sign-up">Sign in</button>
        </form>
        <p id="status"></p>
        <button id="quote">It's "quoted"</button>
    </body>
    </html>
    "#;

    pub const LATE_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <body>
        <script>
            setTimeout(() => {
                const el = document.createElement('div');
                el.id = 'late';
                el.textContent = 'Arrived';
                document.body.appendChild(el);
            }, 500);
        </script>
    </body>
    </html>
    "#;
}

/// Helper to create a test HTML file
pub fn create_test_html(content: &str) -> PathBuf {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("test.html");
    std::fs::write(&file_path, content).expect("Failed to write test HTML");

    // Leak the temp_dir to keep it alive for the test
    std::mem::forget(temp_dir);
    file_path
}

/// Browser to test with, from WEBSEEK_TEST_BROWSER (firefox by default)
pub fn get_test_browser() -> BrowserType {
    std::env::var("WEBSEEK_TEST_BROWSER")
        .ok()
        .and_then(|b| b.parse().ok())
        .unwrap_or_default()
}

/// Open `html` in a fresh headless session
pub async fn open_page(html: &str, config: LocatorConfig) -> Session<WebDriverBackend> {
    let page = create_test_html(html);
    let backend = WebDriverBackend::connect(get_test_browser(), None, None, true)
        .await
        .expect("WebDriver not reachable");
    backend
        .goto(&format!("file://{}", page.display()))
        .await
        .expect("Failed to open fixture page");
    Session::new(backend, config)
}
