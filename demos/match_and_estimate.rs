//! Example: full correspondence pipeline on synthetic data
//!
//! Generates two synthetic "images" (keypoints with descriptors, related by
//! a known transform, plus some spurious detections), then matches, filters,
//! and estimates the homography.

use nalgebra::{DMatrix, Matrix3};
use rand::prelude::*;

use keymatch::{
    estimate_homography, find_best_matches, find_best_matches_ransac, homography::project,
    Keypoint, LeastSquaresSolver, UniformRandomSampler, DESCRIPTOR_LEN,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Keypoint Matching + Homography Estimation Example ===\n");

    let n_true = 30;
    let n_spurious = 10;
    let n_total = n_true + n_spurious;

    let mut rng = StdRng::seed_from_u64(2024);

    // Ground-truth homography: scale + translation + mild perspective.
    let h_true = Matrix3::new(1.8, 0.05, 120.0, -0.02, 1.9, 40.0, 1e-4, 5e-5, 1.0);

    // Shared appearance: each true keypoint pair gets one random unit
    // descriptor; spurious keypoints get unrelated ones.
    let mut descriptors1 = DMatrix::<f64>::zeros(n_total, DESCRIPTOR_LEN);
    let mut descriptors2 = DMatrix::<f64>::zeros(n_total, DESCRIPTOR_LEN);
    for i in 0..n_total {
        let d = random_unit(&mut rng);
        for j in 0..DESCRIPTOR_LEN {
            descriptors1[(i, j)] = d[j];
        }
        let d2 = if i < n_true { d } else { random_unit(&mut rng) };
        for j in 0..DESCRIPTOR_LEN {
            descriptors2[(i, j)] = d2[j];
        }
    }

    // Geometry: true pairs agree on a 20° rotation offset and a 1.8x scale
    // ratio; spurious ones are random.
    let mut kps1 = Vec::with_capacity(n_total);
    let mut kps2 = Vec::with_capacity(n_total);
    for i in 0..n_total {
        let row = rng.gen_range(0.0..480.0);
        let col = rng.gen_range(0.0..640.0);
        kps1.push(Keypoint::new(row, col, 1.8, rng.gen_range(0.0..360.0)));
        if i < n_true {
            let mapped = project(&h_true, col, row);
            kps2.push(Keypoint::new(
                mapped[1],
                mapped[0],
                1.0,
                kps1[i].orientation - 20.0,
            ));
        } else {
            kps2.push(Keypoint::new(
                rng.gen_range(0.0..480.0),
                rng.gen_range(0.0..640.0),
                rng.gen_range(0.2..5.0),
                rng.gen_range(0.0..360.0),
            ));
        }
    }

    println!(
        "Generated {} true pairs and {} spurious detections",
        n_true, n_spurious
    );

    // Stage 1: ratio-test matching.
    let candidates = find_best_matches(&descriptors1, &descriptors2, 0.8)?;
    println!("Ratio test: {} candidate matches", candidates.len());

    // Stage 1+2 composed: ratio test, then orientation/scale consensus.
    let filtered = find_best_matches_ransac(
        &kps1,
        &kps2,
        &descriptors1,
        &descriptors2,
        0.8,
        15.0,
        0.3,
    )?;
    println!("Consensus filter: {} matches kept", filtered.len());

    // Stage 3: homography from the filtered correspondences.
    let xy_src: Vec<[f64; 2]> = filtered.iter().map(|m| kps1[m.query].xy()).collect();
    let xy_ref: Vec<[f64; 2]> = filtered.iter().map(|m| kps2[m.train].xy()).collect();

    let mut sampler = UniformRandomSampler::from_seed(7);
    let solver = LeastSquaresSolver::new();
    let estimate = estimate_homography(&xy_src, &xy_ref, 1000, 2.0, &mut sampler, &solver)?;

    println!(
        "\nRANSAC homography: {} of {} inliers after {} iterations",
        estimate.inliers.len(),
        xy_src.len(),
        estimate.iterations
    );
    println!("\nEstimated homography (true values in parentheses):");
    for r in 0..3 {
        println!(
            "  [{:9.4} ({:7.4}), {:9.4} ({:7.4}), {:9.4} ({:7.4})]",
            estimate.h[(r, 0)],
            h_true[(r, 0)],
            estimate.h[(r, 1)],
            h_true[(r, 1)],
            estimate.h[(r, 2)],
            h_true[(r, 2)],
        );
    }

    Ok(())
}

fn random_unit(rng: &mut StdRng) -> Vec<f64> {
    let mut v: Vec<f64> = (0..DESCRIPTOR_LEN).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    for x in &mut v {
        *x /= norm;
    }
    v
}
