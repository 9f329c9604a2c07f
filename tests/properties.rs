use polysolve::decoder::{decode, MAX_BASE, MIN_BASE};
use polysolve::solver::{solve, Method, Point};
use proptest::prelude::*;

const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

proptest! {
    #[test]
    fn zero_and_ten_decode_to_zero_and_base(base in MIN_BASE..=MAX_BASE) {
        prop_assert_eq!(decode("0", base).unwrap(), 0);
        prop_assert_eq!(decode("10", base).unwrap(), i64::from(base));
    }

    #[test]
    fn repeated_max_digit_is_power_minus_one(base in MIN_BASE..=MAX_BASE, len in 1u32..8) {
        let max_digit = DIGITS[(base - 1) as usize] as char;
        let digits: String = std::iter::repeat(max_digit).take(len as usize).collect();
        let expected = i64::from(base).pow(len) - 1;
        prop_assert_eq!(decode(&digits, base).unwrap(), expected);
        prop_assert_eq!(decode(&digits.to_uppercase(), base).unwrap(), expected);
    }

    #[test]
    fn leading_zeros_do_not_change_value(
        value in 0i64..1_000_000,
        base in MIN_BASE..=MAX_BASE,
        zeros in 0usize..4,
    ) {
        let digits = format!("{}{}", "0".repeat(zeros), encode(value, base));
        prop_assert_eq!(decode(&digits, base).unwrap(), value);
    }

    #[test]
    fn exact_system_recovers_generated_constant(
        a in -50i64..50,
        b in -1_000i64..1_000,
        c in -1_000_000i64..1_000_000,
        x1 in 1i64..20,
        dx2 in 1i64..10,
        dx3 in 1i64..10,
    ) {
        let f = |x: i64| a * x * x + b * x + c;
        let xs = [x1, x1 + dx2, x1 + dx2 + dx3];
        let points: Vec<Point> = xs.iter().map(|&x| Point::new(x, f(x))).collect();

        let result = solve(&points).unwrap();
        prop_assert_eq!(result.method, Method::ExactSystem);
        prop_assert_eq!(result.constant, c);
    }
}

proptest! {
    #[test]
    fn large_constants_survive_exact_solve(
        c in -(1i64 << 62)..(1i64 << 62),
        a in -50i64..50,
        b in -1_000i64..1_000,
    ) {
        let points: Vec<Point> = [2i64, 5, 11]
            .iter()
            .map(|&x| Point::new(x, a * x * x + b * x + c))
            .collect();
        prop_assert_eq!(solve(&points).unwrap().constant, c);
    }
}

fn encode(mut value: i64, base: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % i64::from(base)) as usize]);
        value /= i64::from(base);
    }
    out.reverse();
    String::from_utf8(out).expect("ascii digits")
}
