use axum::Router;
use common::BlogConfig;
use naver_blog::NaverBlogAPI;
use std::net::SocketAddr;

/// Serves `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// API client whose requests for the mobile blog host land on `addr`.
pub fn blog_api(addr: SocketAddr) -> NaverBlogAPI {
    let client = reqwest::Client::builder()
        .resolve("m.blog.naver.com", addr)
        .no_proxy()
        .build()
        .unwrap();
    let config = BlogConfig {
        mobile_base_url: format!("http://m.blog.naver.com:{}", addr.port()),
        ..BlogConfig::default()
    };
    NaverBlogAPI::with_client(client, config)
}
