use std::collections::HashMap;

use lineuplist::error::Error;
use lineuplist::management::effective_count;
use lineuplist::spotify::tracks::merge_ranked;
use lineuplist::types::{ArtistLink, ArtistRef, PlaylistRequest, TrackCount, TrackObject};
use lineuplist::vision::parse_artist_list;

// Helper function to create a test track with its artist credits
fn track(uri: &str, popularity: u32, artist_ids: &[&str]) -> TrackObject {
    TrackObject {
        uri: uri.to_string(),
        popularity,
        artists: artist_ids
            .iter()
            .map(|id| ArtistLink { id: id.to_string() })
            .collect(),
    }
}

fn request(global: TrackCount, overrides: &[(&str, TrackCount)]) -> PlaylistRequest {
    PlaylistRequest {
        playlist_name: "Test".to_string(),
        artists: vec![
            ArtistRef {
                id: Some("1".to_string()),
                name: "A".to_string(),
            },
            ArtistRef {
                id: None,
                name: "B".to_string(),
            },
        ],
        track_count: global,
        per_artist_counts: overrides
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect::<HashMap<_, _>>(),
    }
}

#[test]
fn test_merge_deduplicates_by_uri_first_seen_wins() {
    let strict = vec![track("spotify:track:x", 90, &["artist1"])];
    let broad = vec![
        track("spotify:track:x", 10, &["artist1"]),
        track("spotify:track:y", 50, &["artist1"]),
    ];

    let merged = merge_ranked(vec![strict, broad], "artist1", 10);

    assert_eq!(merged, vec!["spotify:track:x", "spotify:track:y"]);
}

#[test]
fn test_strict_copy_outranks_broad_duplicate() {
    // The broad copy of X carries a lower popularity; if it won the
    // dedup, X would sort below Y.
    let strict = vec![track("spotify:track:x", 90, &["artist1"])];
    let broad = vec![
        track("spotify:track:y", 50, &["artist1"]),
        track("spotify:track:x", 10, &["artist1"]),
    ];

    let merged = merge_ranked(vec![strict, broad], "artist1", 10);

    assert_eq!(merged, vec!["spotify:track:x", "spotify:track:y"]);
}

#[test]
fn test_ranking_is_descending_by_popularity() {
    let batch = vec![
        track("spotify:track:a", 30, &["artist1"]),
        track("spotify:track:b", 90, &["artist1"]),
        track("spotify:track:c", 60, &["artist1"]),
    ];

    let merged = merge_ranked(vec![batch], "artist1", 10);

    assert_eq!(
        merged,
        vec!["spotify:track:b", "spotify:track:c", "spotify:track:a"]
    );
}

#[test]
fn test_ranking_ties_keep_insertion_order() {
    let batch = vec![
        track("spotify:track:first", 50, &["artist1"]),
        track("spotify:track:second", 50, &["artist1"]),
    ];

    let merged = merge_ranked(vec![batch], "artist1", 10);

    assert_eq!(merged, vec!["spotify:track:first", "spotify:track:second"]);
}

#[test]
fn test_other_artists_tracks_are_filtered_out() {
    // Broad name-only queries surface same-named artists; only tracks
    // crediting the target id survive.
    let batch = vec![
        track("spotify:track:ours", 20, &["artist1", "featured"]),
        track("spotify:track:theirs", 95, &["imposter"]),
    ];

    let merged = merge_ranked(vec![batch], "artist1", 10);

    assert_eq!(merged, vec!["spotify:track:ours"]);
}

#[test]
fn test_limit_truncates_after_ranking() {
    let batch = vec![
        track("spotify:track:a", 30, &["artist1"]),
        track("spotify:track:b", 90, &["artist1"]),
        track("spotify:track:c", 60, &["artist1"]),
    ];

    let merged = merge_ranked(vec![batch], "artist1", 2);

    assert_eq!(merged, vec!["spotify:track:b", "spotify:track:c"]);
}

#[test]
fn test_empty_batches_merge_to_nothing() {
    let merged = merge_ranked(vec![Vec::new(), Vec::new()], "artist1", 5);
    assert!(merged.is_empty());
}

#[test]
fn test_effective_count_prefers_per_artist_override() {
    let request = request(TrackCount::Count(5), &[("B", TrackCount::All)]);

    assert_eq!(effective_count(&request, "A"), TrackCount::Count(5));
    assert_eq!(effective_count(&request, "B"), TrackCount::All);
}

#[test]
fn test_effective_count_falls_back_to_global() {
    let request = request(TrackCount::Count(3), &[]);

    assert_eq!(effective_count(&request, "A"), TrackCount::Count(3));
    assert_eq!(effective_count(&request, "unknown"), TrackCount::Count(3));
}

#[test]
fn test_track_count_deserializes_numbers_and_all() {
    assert_eq!(
        serde_json::from_str::<TrackCount>("5").unwrap(),
        TrackCount::Count(5)
    );
    assert_eq!(
        serde_json::from_str::<TrackCount>("\"all\"").unwrap(),
        TrackCount::All
    );
    assert_eq!(
        serde_json::from_str::<TrackCount>("\"ALL\"").unwrap(),
        TrackCount::All
    );
}

#[test]
fn test_track_count_rejects_zero_and_junk() {
    assert!(serde_json::from_str::<TrackCount>("0").is_err());
    assert!(serde_json::from_str::<TrackCount>("\"weekly\"").is_err());
}

#[test]
fn test_playlist_request_deserializes_mixed_artist_refs() {
    let request: PlaylistRequest = serde_json::from_str(
        r#"{
            "playlist_name": "Festival 2026",
            "artists": [
                {"id": "1", "name": "A"},
                {"name": "B"}
            ],
            "track_count": 5,
            "per_artist_counts": {"B": "all"}
        }"#,
    )
    .unwrap();

    assert_eq!(request.artists.len(), 2);
    assert_eq!(request.artists[0].id.as_deref(), Some("1"));
    assert!(request.artists[1].id.is_none());
    assert_eq!(request.track_count, TrackCount::Count(5));
    assert_eq!(effective_count(&request, "B"), TrackCount::All);
}

#[test]
fn test_parse_artist_list_handles_markdown_fences() {
    let text = "```json\n[\"Arctic Monkeys\", \"Tame Impala\", \"Bicep\"]\n```";
    let artists = parse_artist_list(text).unwrap();

    assert_eq!(artists, vec!["Arctic Monkeys", "Tame Impala", "Bicep"]);
}

#[test]
fn test_parse_artist_list_trims_and_drops_non_strings() {
    let text = "[\" Four Tet \", 42, \"\", \"Overmono\"]";
    let artists = parse_artist_list(text).unwrap();

    assert_eq!(artists, vec!["Four Tet", "Overmono"]);
}

#[test]
fn test_parse_artist_list_fails_without_an_array() {
    let err = parse_artist_list("I could not find any artist names.").unwrap_err();
    assert!(matches!(err, Error::ExtractionFailed(_)));

    let err = parse_artist_list("] backwards [").unwrap_err();
    assert!(matches!(err, Error::ExtractionFailed(_)));
}
