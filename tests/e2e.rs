use jpath_query as jpq;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const STORE: &str = r#"{
    "store": {
        "bicycle": {
            "color": "red",
            "price": 19.95
        },
        "book": [
            {
                "author": "Nigel Rees",
                "category": "reference",
                "price": 8.95,
                "title": "Sayings of the Century"
            },
            {
                "author": "Evelyn Waugh",
                "category": "fiction",
                "price": 12.99,
                "title": "Sword of Honour"
            },
            {
                "author": "Herman Melville",
                "category": "fiction",
                "isbn": "0-553-21311-3",
                "price": 8.99,
                "title": "Moby Dick"
            },
            {
                "author": "J. R. R. Tolkien",
                "category": "fiction",
                "isbn": "0-395-19395-8",
                "price": 22.99,
                "title": "The Lord of the Rings"
            }
        ]
    }
}"#;

fn store() -> jpq::Jpath {
    STORE.parse().unwrap()
}

fn owned(results: Vec<&Value>) -> Vec<Value> {
    results.into_iter().cloned().collect()
}

#[test]
fn test_child_selector() {
    let doc = store();
    assert_eq!(owned(doc.query("$.store.bicycle.color")), vec![json!("red")]);
}

#[test]
fn test_all_prices() {
    let doc = store();
    let results = doc.query("$..price");
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|v| v.is_number()));
    assert_eq!(doc.floats("$..price"), vec![19.95, 8.95, 12.99, 8.99, 22.99]);
}

#[test]
fn test_book_prices_only() {
    let doc = store();
    assert_eq!(doc.floats("$..book..price"), vec![8.95, 12.99, 8.99, 22.99]);
}

#[test]
fn test_index_then_child() {
    let doc = store();
    assert_eq!(
        owned(doc.query("$.store.book[0].title")),
        vec![json!("Sayings of the Century")]
    );
    assert_eq!(doc.string("$.store.book[-1].title"), Some("The Lord of the Rings"));
}

#[test]
fn test_slices_and_wildcard() {
    let doc = store();
    assert_eq!(
        doc.strings("$..book[0:2].title"),
        vec!["Sayings of the Century", "Sword of Honour"]
    );
    assert_eq!(doc.strings("$..book[-2:].isbn"), vec!["0-553-21311-3", "0-395-19395-8"]);
    assert_eq!(doc.strings("$.store.book[*].author").len(), 4);
    // only two books carry an isbn
    assert_eq!(doc.strings("$.store.book[*].isbn").len(), 2);
}

#[test]
fn test_repeated_queries_are_identical() {
    let doc = store();
    let once = owned(doc.query("$..book[1:].price"));
    let twice = owned(doc.query("$..book[1:].price"));
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn test_compiled_path_reuse() {
    let doc = store();
    let path = jpq::compile("$..book[*].category");
    assert_eq!(path.len(), 3);
    let categories = owned(doc.query_compiled(&path));
    assert_eq!(
        jpq::unique(&categories.iter().collect::<Vec<_>>()),
        vec![&json!("reference"), &json!("fiction")]
    );
}

#[test]
fn test_concurrent_reads() {
    let doc = store();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| doc.floats("$..price")))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().len(), 5);
        }
    });
}
