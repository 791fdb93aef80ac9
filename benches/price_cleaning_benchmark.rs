//! Price cleaning and product page extraction throughput

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use price_watch_lib::domain::{Price, PricingAnalyzer, ProductExtractor, clean_description, clean_price};
use price_watch_lib::infrastructure::ProductPageParser;

const PRODUCT_PAGE: &str = r#"
    <html><body>
      <nav><a href="/">Home</a> &gt; <a href="/kitchen">Kitchen</a></nav>
      <h1 class="product-name">Steel Kettle 1.7L</h1>
      <span class="price">$1,234.56</span>
      <div class="description"><p>Brushed   steel,</p> <b>auto shut-off</b>, 2200W</div>
      <span class="availability">In stock</span>
    </body></html>
"#;

fn bench_clean_price(c: &mut Criterion) {
    let samples = ["$1,234.56", "€ 49.90", "Rs. 499", "USD 12.99.", "Price: 1 299,00 kr"];

    c.bench_function("clean_price", |b| {
        b.iter(|| {
            for sample in samples {
                let _ = black_box(clean_price(black_box(sample)));
            }
        });
    });

    c.bench_function("clean_description", |b| {
        b.iter(|| clean_description(black_box("<p>Brushed   steel,</p>\n <b>auto shut-off</b>")));
    });
}

fn bench_extract(c: &mut Criterion) {
    let parser = ProductPageParser::new().unwrap();

    c.bench_function("extract_product_page", |b| {
        b.iter(|| parser.extract(black_box(PRODUCT_PAGE), "https://shop.example/kettle"));
    });
}

fn bench_summarize(c: &mut Criterion) {
    let analyzer = PricingAnalyzer::default();
    let prices: Vec<Price> = (0..1_000).map(|i| Price::new(f64::from(i) * 0.37).unwrap()).collect();

    c.bench_function("summarize_1000", |b| {
        b.iter(|| analyzer.summarize(black_box(&prices)));
    });
}

criterion_group!(benches, bench_clean_price, bench_extract, bench_summarize);
criterion_main!(benches);
