//! End-to-end scraping against a mock catalog

use crate::common::{
    create_test_config, detail_html, listing_html, mount_detail, mount_listing, request_count,
    standard_detail, Detail,
};
use marquee::crawler::{run_scrape, Coordinator};
use marquee::movie::{Field, MissReason, MovieRecord};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn titles(records: &[MovieRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title()).collect()
}

#[tokio::test]
async fn test_extract_page_two_cards_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[
            ("Alpha", "Jan 01, 2024", "/movie/1-alpha"),
            ("Beta", "Feb 02, 2024", "/movie/2-beta"),
        ],
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/1-alpha",
        &standard_detail("Alice Director", "Alpha overview"),
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/2-beta",
        &Detail {
            rating_token: Some("r85"),
            genres: &["Action"],
            runtime: "2h 5m",
            overview: "Beta overview",
            director: "Bob Director",
        },
    )
    .await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    let page = coordinator.extract_page(&page_urls[0]).await;

    assert!(page.fetched);
    let records = page.into_records();
    assert_eq!(records.len(), 2);

    let alpha = &records[0];
    assert_eq!(alpha.title(), "Alpha");
    assert_eq!(alpha.date(), "Jan 01, 2024");
    assert_eq!(alpha.rating(), "72");
    assert_eq!(alpha.genres(), "Comedy,Drama");
    assert_eq!(alpha.runtime(), "1h 57m");
    assert_eq!(alpha.overview(), "Alpha overview");
    assert_eq!(alpha.director(), "Alice Director");

    let beta = &records[1];
    assert_eq!(beta.title(), "Beta");
    assert_eq!(beta.rating(), "85");
    assert_eq!(beta.genres(), "Action");
    assert_eq!(beta.runtime(), "2h 5m");
    assert_eq!(beta.director(), "Bob Director");
    assert!(beta.is_complete());
}

#[tokio::test]
async fn test_unreachable_detail_page_degrades_to_placeholders() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[("Lost", "Mar 03, 2024", "/movie/3-lost")],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/movie/3-lost"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let max_attempts = config.fetcher.max_attempts as usize;
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    let page = coordinator.extract_page(&page_urls[0]).await;

    assert_eq!(page.movies.len(), 1);
    let movie = &page.movies[0];
    assert!(!movie.detail_fetched);
    assert_eq!(movie.record.title(), "Lost");
    assert_eq!(movie.record.date(), "Mar 03, 2024");
    for field in Field::DETAIL {
        assert_eq!(movie.record.get(field), "NA", "{} should be NA", field);
    }

    let reasons: Vec<(Field, MissReason)> = movie
        .diagnostics
        .iter()
        .map(|d| (d.field, d.reason.clone()))
        .collect();
    assert_eq!(
        reasons,
        Field::DETAIL
            .iter()
            .map(|f| (*f, MissReason::DetailPageUnavailable))
            .collect::<Vec<_>>()
    );

    assert_eq!(
        request_count(&mock_server, "/movie/3-lost").await,
        max_attempts
    );
}

#[tokio::test]
async fn test_missing_rating_does_not_affect_other_fields() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[("Unscored", "Apr 04, 2024", "/movie/4-unscored")],
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/4-unscored",
        &Detail {
            rating_token: None,
            genres: &["Horror", "Mystery"],
            runtime: "1h 30m",
            overview: "Spooky",
            director: "Carol",
        },
    )
    .await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    let page = coordinator.extract_page(&page_urls[0]).await;

    let record = &page.movies[0].record;
    assert_eq!(record.rating(), "NA");
    assert_eq!(record.genres(), "Horror,Mystery");
    assert_eq!(record.runtime(), "1h 30m");
    assert_eq!(record.overview(), "Spooky");
    assert_eq!(record.director(), "Carol");
    assert_eq!(record.missing_fields(), vec![Field::Rating]);
}

#[tokio::test]
async fn test_not_rated_movie() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[("Upcoming", "Dec 24, 2026", "/movie/5-upcoming")],
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/5-upcoming",
        &Detail {
            rating_token: Some("rNR"),
            genres: &["Animation"],
            runtime: "1h 40m",
            overview: "Soon",
            director: "Dana",
        },
    )
    .await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    let page = coordinator.extract_page(&page_urls[0]).await;

    let movie = &page.movies[0];
    assert_eq!(movie.record.rating(), "NA");
    assert_eq!(movie.record.genres(), "Animation");
    // Not-rated is a known value, not a missing element
    assert!(movie.diagnostics.is_empty());
}

#[tokio::test]
async fn test_slow_detail_page_keeps_card_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[
            ("Slow", "Jan 01, 2024", "/movie/6-slow"),
            ("Fast", "Jan 02, 2024", "/movie/7-fast"),
            ("Faster", "Jan 03, 2024", "/movie/8-faster"),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/movie/6-slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_html(&standard_detail("Slow Director", "Slow")))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    mount_detail(
        &mock_server,
        "/movie/7-fast",
        &standard_detail("Fast Director", "Fast"),
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/8-faster",
        &standard_detail("Faster Director", "Faster"),
    )
    .await;

    let mut config = create_test_config(&base_url, 1, "unused.csv");
    config.scraper.concurrency = 3;
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    let records = coordinator.extract_page(&page_urls[0]).await.into_records();

    assert_eq!(titles(&records), vec!["Slow", "Fast", "Faster"]);
    assert_eq!(records[0].director(), "Slow Director");
    assert_eq!(records[2].director(), "Faster Director");
}

#[tokio::test]
async fn test_run_concatenates_pages_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[
            ("One", "Jan 01, 2024", "/movie/11-one"),
            ("Two", "Jan 02, 2024", "/movie/12-two"),
        ],
    )
    .await;
    mount_listing(
        &mock_server,
        2,
        &[("Three", "Jan 03, 2024", "/movie/13-three")],
    )
    .await;
    for detail_path in ["/movie/11-one", "/movie/12-two", "/movie/13-three"] {
        mount_detail(&mock_server, detail_path, &standard_detail("Dir", "Plot")).await;
    }

    let config = create_test_config(&base_url, 2, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Run should succeed");

    assert_eq!(titles(&report.records), vec!["One", "Two", "Three"]);
    assert_eq!(report.statistics.pages_requested, 2);
    assert_eq!(report.statistics.pages_failed, 0);
    assert_eq!(report.statistics.movies, 3);
    assert_eq!(report.statistics.complete_movies, 3);
    assert!(report.statistics.finished_at.is_some());
}

#[tokio::test]
async fn test_unreachable_listing_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/movie"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    mount_listing(
        &mock_server,
        2,
        &[("Survivor", "May 05, 2024", "/movie/20-survivor")],
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/20-survivor",
        &standard_detail("Eve", "Still here"),
    )
    .await;

    let config = create_test_config(&base_url, 2, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Run should continue past a failed page");

    assert_eq!(titles(&report.records), vec!["Survivor"]);
    assert_eq!(report.statistics.pages_requested, 2);
    assert_eq!(report.statistics.pages_failed, 1);
}

#[tokio::test]
async fn test_rerun_is_identical() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[
            ("Same", "Jun 06, 2024", "/movie/30-same"),
            ("Same", "Jun 06, 2024", "/movie/30-same"),
            ("Gone", "Jun 07, 2024", "/movie/31-gone"),
        ],
    )
    .await;
    mount_detail(&mock_server, "/movie/30-same", &standard_detail("Frank", "Twice")).await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");

    let first = coordinator.run().await.expect("First run should succeed");
    let second = coordinator.run().await.expect("Second run should succeed");

    // Duplicate cards are kept, not deduplicated
    assert_eq!(first.records.len(), 3);
    assert_eq!(first.records, second.records);
}

#[tokio::test]
async fn test_run_scrape_writes_csv() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        1,
        &[
            ("Exported", "Jul 07, 2024", "/movie/40-exported"),
            ("Partial", "Jul 08, 2024", "/movie/41-partial"),
        ],
    )
    .await;
    mount_detail(
        &mock_server,
        "/movie/40-exported",
        &standard_detail("Grace", "Written out"),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("movies.csv");
    let config = create_test_config(&base_url, 1, csv_path.to_str().unwrap());

    let report = run_scrape(config).await.expect("Scrape should succeed");
    assert_eq!(report.records.len(), 2);

    let mut reader = csv::Reader::from_path(&csv_path).expect("CSV should exist");
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec!["Title", "Date", "Rating", "Genres", "Runtime", "Overview", "Director"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Exported");
    assert_eq!(&rows[0][2], "72");
    assert_eq!(&rows[0][3], "Comedy,Drama");
    assert_eq!(&rows[0][6], "Grace");
    assert_eq!(&rows[1][0], "Partial");
    assert_eq!(&rows[1][1], "Jul 08, 2024");
    for column in 2..7 {
        assert_eq!(&rows[1][column], "NA");
    }
}

#[tokio::test]
async fn test_card_without_link_or_date_degrades() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let listing = r#"<html><body>
        <div class="card style_1"><div class="content"><h2>Unlinked</h2></div></div>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/movie"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    let page = coordinator.extract_page(&page_urls[0]).await;

    assert!(page.fetched);
    assert_eq!(page.movies.len(), 1);
    let movie = &page.movies[0];
    assert!(!movie.detail_fetched);
    assert_eq!(movie.record.title(), "Unlinked");
    for field in Field::ALL.into_iter().filter(|f| *f != Field::Title) {
        assert_eq!(movie.record.get(field), "NA", "{} should be NA", field);
    }

    let reasons: Vec<(Field, MissReason)> = movie
        .diagnostics
        .iter()
        .map(|d| (d.field, d.reason.clone()))
        .collect();
    let mut expected = vec![(Field::Date, MissReason::ElementNotFound)];
    expected.extend(
        Field::DETAIL
            .iter()
            .map(|f| (*f, MissReason::DetailPageUnavailable)),
    );
    assert_eq!(reasons, expected);
    assert!(movie.diagnostics.iter().all(|d| d.title == "Unlinked"));

    // Only the listing page was requested
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/tmdb", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/tmdb/movie"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_html(&[(
                "Mirrored",
                "Apr 04, 2024",
                "/movie/4-mirrored",
            )])),
        )
        .mount(&mock_server)
        .await;
    mount_detail(
        &mock_server,
        "/tmdb/movie/4-mirrored",
        &standard_detail("Mirror Director", "Seen through glass"),
    )
    .await;

    let config = create_test_config(&base_url, 1, "unused.csv");
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let page_urls = coordinator.page_urls().unwrap();
    assert_eq!(
        page_urls[0].as_str(),
        format!("{}/tmdb/movie?page=1", mock_server.uri())
    );

    let records = coordinator.extract_page(&page_urls[0]).await.into_records();

    assert_eq!(titles(&records), vec!["Mirrored"]);
    assert!(records[0].is_complete());
    assert_eq!(records[0].director(), "Mirror Director");
    assert_eq!(request_count(&mock_server, "/tmdb/movie/4-mirrored").await, 1);
}
