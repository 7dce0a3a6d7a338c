use boardsight::{BoardReader, BoundingBox, PieceDetection};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;

fn full_board() -> Vec<PieceDetection> {
    let back = ["Rook", "Knight", "Bishop", "Queen", "King", "Bishop", "Knight", "Rook"];
    let mut out = Vec::with_capacity(32);
    for (col, kind) in back.iter().enumerate() {
        let x = col as f32 * 100.0 + 20.0;
        for (row, label) in [
            (0usize, format!("{kind}_b")),
            (1, "Pawn_b".to_string()),
            (6, "Pawn_w".to_string()),
            (7, format!("{kind}_w")),
        ] {
            let bottom = (row + 1) as f32 * 100.0 - 2.0;
            out.push(PieceDetection::new(
                BoundingBox::new(x, bottom - 120.0, x + 60.0, bottom),
                label,
            ));
        }
    }
    out
}

fn bench_read_frame(c: &mut Criterion) {
    let corners = [
        Point2::new(12.0, 8.0),
        Point2::new(790.0, 15.0),
        Point2::new(805.0, 795.0),
        Point2::new(3.0, 802.0),
    ];
    let detections = full_board();
    let reader = BoardReader::default();

    c.bench_function("read_frame_32_pieces", |b| {
        b.iter(|| reader.read(black_box(&corners), black_box(&detections)))
    });

    c.bench_function("geometry_only", |b| {
        b.iter(|| reader.geometry(black_box(&corners)))
    });
}

criterion_group!(benches, bench_read_frame);
criterion_main!(benches);
