//! Shape and alignment tests for the console matrix formatter

use mltoolz::{ConfusionMatrix, MatrixFormat};
use rand::Rng;

fn random_matrix(rng: &mut impl Rng, n: usize) -> ConfusionMatrix {
    let labels: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
    let grid: Vec<Vec<u64>> = (0..n)
        .map(|_| (0..n).map(|_| rng.random_range(0..100u64)).collect())
        .collect();
    ConfusionMatrix::from_counts(&grid, &labels).unwrap()
}

#[test]
fn test_random_matrices_have_aligned_grid_shape() {
    let mut rng = rand::rng();
    for _ in 0..50 {
        let n = rng.random_range(1..=8);
        let cm = random_matrix(&mut rng, n);
        let text = cm.to_text(&MatrixFormat::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), n + 1, "one header line plus one per class");
        let expected_len = lines[0].len();
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.len(), expected_len, "line {} out of alignment", i);
        }
        for line in &lines[1..] {
            assert_eq!(line.split_whitespace().count(), n + 1);
        }
    }
}

#[test]
fn test_suppression_never_breaks_alignment() {
    let mut rng = rand::rng();
    let format = MatrixFormat {
        hide_zeroes: true,
        hide_diagonal: true,
        hide_threshold: Some(50.0),
        ..MatrixFormat::default()
    };
    for _ in 0..50 {
        let n = rng.random_range(2..=6);
        let cm = random_matrix(&mut rng, n);
        let text = cm.to_text(&format);
        let expected_len = text.lines().next().unwrap().len();
        for line in text.lines() {
            assert_eq!(line.len(), expected_len);
        }
    }
}

#[test]
fn test_diagonal_suppression_blanks_every_diagonal_cell() {
    let mut rng = rand::rng();
    let format = MatrixFormat {
        hide_diagonal: true,
        ..MatrixFormat::default()
    };
    for _ in 0..20 {
        let n = rng.random_range(1..=6);
        let cm = random_matrix(&mut rng, n);
        let text = cm.to_text(&format);

        let width = cm
            .labels()
            .iter()
            .map(|l| l.len())
            .max()
            .unwrap()
            .max(format.min_value_width);
        for (i, line) in text.lines().skip(1).enumerate() {
            // field i + 1 of row i is the diagonal cell
            let start = 4 + (i + 1) * (width + 1);
            let cell = &line[start..start + width];
            assert!(cell.trim().is_empty(), "diagonal cell {} not blank: {:?}", i, cell);
        }
    }
}

#[test]
fn test_spec_end_to_end_example() {
    let grid = vec![vec![5u64, 0], vec![2, 3]];
    let cm = ConfusionMatrix::from_counts(&grid, &["A", "B"]).unwrap();
    let format = MatrixFormat {
        hide_zeroes: true,
        ..MatrixFormat::default()
    };
    let text = cm.to_text(&format);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("    {:>5} {:>5} {:>5} ", "", "A", "B"));
    assert_eq!(lines[1], format!("    {:>5} {:>5} {:>5} ", "A", "5", ""));
    assert_eq!(lines[2], format!("    {:>5} {:>5} {:>5} ", "B", "2", "3"));
}
