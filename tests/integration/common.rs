//! Shared fixtures for the integration tests

use marquee::config::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A listing card: title, release date, detail path
pub type Card<'a> = (&'a str, &'a str, &'a str);

/// Creates a configuration pointing at the mock server
pub fn create_test_config(base_url: &str, last_page: u32, csv_path: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.site.first_page = 1;
    config.site.last_page = last_page;
    config.fetcher.user_agent = "MarqueeTest/1.0".to_string();
    config.fetcher.max_attempts = 2;
    config.fetcher.retry_delay_ms = 0;
    config.fetcher.timeout_secs = 5;
    config.scraper.concurrency = 2;
    config.output.csv_path = csv_path.to_string();
    config
}

/// Renders a listing page with one card per entry
pub fn listing_html(cards: &[Card<'_>]) -> String {
    let mut html = String::from("<html><body><div class=\"page_wrapper\">");
    for (title, date, detail_path) in cards {
        html.push_str(&format!(
            r#"<div class="card style_1">
                 <div class="image"><a href="{detail_path}" title="{title}"><img src="/poster.jpg"></a></div>
                 <div class="content">
                   <h2><a href="{detail_path}" title="{title}">{title}</a></h2>
                   <p>{date}</p>
                 </div>
               </div>"#
        ));
    }
    html.push_str("</div></body></html>");
    html
}

/// Values rendered into a detail page
pub struct Detail<'a> {
    pub rating_token: Option<&'a str>,
    pub genres: &'a [&'a str],
    pub runtime: &'a str,
    pub overview: &'a str,
    pub director: &'a str,
}

/// Renders a detail page shaped like the catalog's movie page
pub fn detail_html(detail: &Detail<'_>) -> String {
    let rating = detail
        .rating_token
        .map(|token| {
            format!(
                r#"<div class="consensus"><div class="outer_ring"><div class="user_score_chart"><div class="percent"><span class="icon icon-{token}"></span></div></div></div></div>"#
            )
        })
        .unwrap_or_default();

    let genres: Vec<String> = detail
        .genres
        .iter()
        .enumerate()
        .map(|(i, genre)| format!(r#"<a href="/genre/{i}">{genre}</a>"#))
        .collect();

    format!(
        r#"<html><body>
          <section class="header">
            {rating}
            <div class="facts">
              <span class="genres">{genres}</span>
              <span class="runtime">
                {runtime}
              </span>
            </div>
            <div class="overview"><p>{overview}</p></div>
            <ol class="people no_image">
              <li class="profile"><p><a href="/person/10">Writer Person</a></p><p class="character">Screenplay</p></li>
              <li class="profile"><p><a href="/person/11">{director}</a></p><p class="character">Director</p></li>
            </ol>
          </section>
        </body></html>"#,
        genres = genres.join(",&nbsp;"),
        runtime = detail.runtime,
        overview = detail.overview,
        director = detail.director,
    )
}

/// A fully populated detail page
pub fn standard_detail<'a>(director: &'a str, overview: &'a str) -> Detail<'a> {
    Detail {
        rating_token: Some("r72"),
        genres: &["Comedy", "Drama"],
        runtime: "1h 57m",
        overview,
        director,
    }
}

/// Serves a listing page for the given page number
pub async fn mount_listing(server: &MockServer, page: u32, cards: &[Card<'_>]) {
    Mock::given(method("GET"))
        .and(path("/movie"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(cards)))
        .mount(server)
        .await;
}

/// Serves a detail page at the given path
pub async fn mount_detail(server: &MockServer, detail_path: &str, detail: &Detail<'_>) {
    Mock::given(method("GET"))
        .and(path(detail_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_html(detail)))
        .mount(server)
        .await;
}

/// Number of requests the server received for a path
pub async fn request_count(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
