//! Property tests for the expression engine

use exprcalc::{ExprParser, ExprValue, NoVars};
use proptest::prelude::*;
use std::collections::HashMap;

fn small_int() -> impl Strategy<Value = i64> {
    0i64..1000
}

proptest! {
    #[test]
    fn sum_matches_integer_arithmetic(terms in prop::collection::vec(small_int(), 1..20)) {
        let expr = terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("+");
        let expected: i64 = terms.iter().sum();

        let parser = ExprParser::new();
        prop_assert_eq!(
            parser.evaluate(&expr, &NoVars).unwrap(),
            ExprValue::Number(expected as f64)
        );
    }

    #[test]
    fn subtraction_chain_is_left_to_right(first in small_int(), rest in prop::collection::vec(small_int(), 1..10)) {
        let mut expr = first.to_string();
        let mut expected = first;
        for t in &rest {
            expr.push('-');
            expr.push_str(&t.to_string());
            expected -= t;
        }

        let parser = ExprParser::new();
        prop_assert_eq!(
            parser.evaluate(&expr, &NoVars).unwrap(),
            ExprValue::Number(expected as f64)
        );
    }

    #[test]
    fn product_binds_tighter_than_sum(a in small_int(), b in small_int(), c in small_int()) {
        let parser = ExprParser::new();
        let expr = format!("{}+{}*{}", a, b, c);
        prop_assert_eq!(
            parser.evaluate(&expr, &NoVars).unwrap(),
            ExprValue::Number((a + b * c) as f64)
        );
    }

    #[test]
    fn cache_is_transparent(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6) {
        let parser = ExprParser::new();
        let vars = HashMap::from([("x".to_string(), x), ("y".to_string(), y)]);

        let first = parser.evaluate("(x+y)*x-y", &vars).unwrap();
        let second = parser.evaluate("(x+y)*x-y", &vars).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(parser.cache().compilations(), 1);
    }

    #[test]
    fn braced_and_plain_agree(a in small_int(), b in small_int()) {
        let parser = ExprParser::new();
        let plain = format!("{}*{}-{}", a, b, a);
        let braced = format!("{{{}}}", plain);

        prop_assert_eq!(
            parser.evaluate(&plain, &NoVars).unwrap(),
            parser.evaluate(&braced, &NoVars).unwrap()
        );
        prop_assert_eq!(parser.cache().len(), 2);
    }
}
