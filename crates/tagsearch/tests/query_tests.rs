//! Integration tests for brute-force nearest-neighbour search.

use tagsearch::conversion::StringConverter;
use tagsearch::{
    with_read, with_write, BruteNearestNeighbour, DistanceMetric, Error, FloatVector,
    FloatVectorConverter, RedbEngine, SearchConfig, TypedPairDatabase, VectorError,
};

type VectorDb = TypedPairDatabase<StringConverter, FloatVectorConverter>;

fn setup(rows: &[(&str, &[f32])]) -> (RedbEngine, VectorDb) {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let values = FloatVectorConverter::new();
    let db = TypedPairDatabase::open(&engine, "vectors", StringConverter, values)
        .expect("failed to open store");
    with_write(&engine, |tx| {
        for (key, vector) in rows {
            db.put(tx, &(*key).to_owned(), &FloatVector::from(*vector))?;
        }
        Ok(())
    })
    .expect("failed to populate store");
    (engine, db)
}

fn keys(neighbours: &[tagsearch::Neighbour<String, FloatVector>]) -> Vec<&str> {
    neighbours.iter().map(|n| n.key.as_str()).collect()
}

const LINE: &[(&str, &[f32])] =
    &[("a", &[0.0, 0.0]), ("b", &[1.0, 0.0]), ("c", &[3.0, 0.0]), ("d", &[10.0, 0.0])];

#[test]
fn test_two_nearest() {
    let (engine, db) = setup(LINE);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 2))
        .expect("search failed");
    assert_eq!(keys(&result), ["a", "b"]);
    assert_eq!(result[0].distance, 0.0);
    assert!((result[1].distance - 1.0).abs() < 1e-6);
    assert_eq!(result[1].value, FloatVector::from(vec![1.0, 0.0]));
}

#[test]
fn test_two_nearest_with_off_axis_point() {
    let (engine, db) =
        setup(&[("a", &[0.0, 0.0]), ("b", &[1.0, 0.0]), ("c", &[3.0, 0.0]), ("d", &[0.0, 5.0])]);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 2))
        .expect("search failed");
    assert_eq!(keys(&result), ["a", "b"]);
    assert_eq!(result[0].distance, 0.0);
    assert!((result[1].distance - 1.0).abs() < 1e-6);
}

#[test]
fn test_k_larger_than_store() {
    let (engine, db) = setup(LINE);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[9.0, 0.0], 100))
        .expect("search failed");
    assert_eq!(keys(&result), ["d", "c", "b", "a"]);
    assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_k_zero() {
    let (engine, db) = setup(LINE);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 0))
        .expect("search failed");
    assert!(result.is_empty());
}

#[test]
fn test_dimension_mismatch_returns_no_results() {
    let (engine, db) = setup(&[("a", &[0.0, 0.0]), ("b", &[1.0, 0.0, 0.0]), ("c", &[2.0, 0.0])]);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 3));
    assert!(matches!(
        result,
        Err(Error::Vector(VectorError::DimensionMismatch { expected: 2, actual: 3 }))
    ));
}

#[test]
fn test_ties_keep_key_order() {
    let (engine, db) =
        setup(&[("p", &[1.0, 0.0]), ("q", &[0.0, 1.0]), ("r", &[-1.0, 0.0]), ("s", &[5.0, 5.0])]);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 2))
        .expect("search failed");
    assert_eq!(keys(&result), ["p", "q"]);
}

#[test]
fn test_max_distance() {
    let (engine, db) = setup(LINE);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let within = with_read(&engine, |tx| {
        nn.search(tx, &[0.0, 0.0], SearchConfig::within_distance(3.0))
    })
    .expect("search failed");
    assert_eq!(keys(&within), ["a", "b", "c"]);

    let capped = with_read(&engine, |tx| {
        nn.search(tx, &[0.0, 0.0], SearchConfig::k_nearest(1).with_max_distance(0.5))
    })
    .expect("search failed");
    assert_eq!(keys(&capped), ["a"]);
}

#[test]
fn test_cosine_distance() {
    let (engine, db) =
        setup(&[("same", &[2.0, 0.0]), ("orthogonal", &[0.0, 3.0]), ("opposite", &[-1.0, 0.0])]);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Cosine);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[1.0, 0.0], 3))
        .expect("search failed");
    assert_eq!(keys(&result), ["same", "orthogonal", "opposite"]);
    assert!(result[0].distance.abs() < 1e-6);
    assert!((result[2].distance - 2.0).abs() < 1e-6);
}

#[test]
fn test_closure_measure() {
    let (engine, db) = setup(LINE);
    let manhattan =
        |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum() };
    let nn = BruteNearestNeighbour::new(&db, manhattan);

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[2.5, 0.0], 2))
        .expect("search failed");
    assert_eq!(keys(&result), ["c", "b"]);
    assert!((result[0].distance - 0.5).abs() < 1e-6);
}

#[test]
fn test_search_sees_uncommitted_writes() {
    let (engine, db) = setup(LINE);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    let result = with_write(&engine, |tx| {
        db.put(tx, &"e".to_owned(), &FloatVector::from(vec![-0.5, 0.0]))?;
        nn.get_neighbours(tx, &[-1.0, 0.0], 1)
    })
    .expect("search failed");
    assert_eq!(keys(&result), ["e"]);
}

#[test]
fn test_closed_store() {
    let (engine, db) = setup(LINE);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);
    db.close();

    let result = with_read(&engine, |tx| nn.get_neighbours(tx, &[0.0, 0.0], 1));
    assert!(matches!(result, Err(Error::Closed(_))));
}
