#![allow(dead_code)]

use model_core::data::Dataset;

/// `TV` equal to `Sales`, the smallest setup where every gradient can be worked out by hand.
pub fn tv_sales() -> Dataset {
    Dataset::from_columns([("TV", vec![1., 2., 3.]), ("Sales", vec![1., 2., 3.])]).unwrap()
}

pub fn advertising() -> Dataset {
    Dataset::from_columns([
        ("TV", vec![230.1, 44.5, 17.2]),
        ("Radio", vec![37.8, 39.3, 45.9]),
        ("Newspaper", vec![69.2, 45.1, 69.3]),
        ("Sales", vec![22.1, 10.4, 9.3]),
    ])
    .unwrap()
}

pub fn newspaper_sales() -> Dataset {
    Dataset::from_columns([
        ("Newspaper", vec![69.2, 45.1, 69.3]),
        ("Sales", vec![22.1, 10.4, 9.3]),
    ])
    .unwrap()
}
