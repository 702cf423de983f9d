use std::io;

use gp_probit::*;
use log::info;
use nalgebra::{DMatrix, DVector};

fn kernel(a: f64, b: f64) -> f64 {
    const SCALE: f64 = 4.0;
    const LENGTH: f64 = 0.8;
    let d = (a - b) / LENGTH;
    SCALE * (-0.5 * d * d).exp()
}

fn main() -> io::Result<()> {
    env_logger::init();
    let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(0);

    let lik = ProbitLikelihood::new();

    const N_DATA: usize = 40;
    let x: Vec<f64> = (0..N_DATA).map(|i| -4.0 + 8.0 * i as f64 / N_DATA as f64).collect();
    let truth = DVector::from_iterator(N_DATA, x.iter().map(|&xi| 3.0 * (1.3 * xi).sin()));
    let y = lik.sample_labels(&truth, &mut rng);

    let k = DMatrix::from_fn(N_DATA, N_DATA, |i, j| {
        kernel(x[i], x[j]) + if i == j { 1E-8 } else { 0.0 }
    });

    let factor = |f: &DVector<f64>| -> io::Result<_> {
        let w = -lik.hessian_diag(&y, f, DerivativeTarget::Latent)?;
        let sw = w.map(f64::sqrt);
        let b = DMatrix::identity(N_DATA, N_DATA)
            + DMatrix::from_fn(N_DATA, N_DATA, |i, j| sw[i] * k[(i, j)] * sw[j]);
        let chol = b
            .cholesky()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "B is not positive definite"))?;
        Ok((w, sw, chol))
    };

    // Newton iterations for the posterior mode
    const MAX_ITER: usize = 50;
    let mut f: DVector<f64> = DVector::zeros(N_DATA);
    let mut objective = std::f64::NEG_INFINITY;
    for iteration in 1..=MAX_ITER {
        let g = lik.grad(&y, &f, DerivativeTarget::Latent)?;
        let (w, sw, chol) = factor(&f)?;

        let rhs = w.component_mul(&f) + &g;
        let a = &rhs - sw.component_mul(&chol.solve(&sw.component_mul(&(&k * &rhs))));
        f = &k * &a;
        let next = lik.ln_f(&y, &f)? - 0.5 * a.dot(&f);
        info!("Laplace objective = {} after {} iterations", next, iteration);

        if (next - objective).abs() < 1E-10 {
            break;
        }
        objective = next;
    }

    // Gradient and curvature at the mode itself
    let g = lik.grad(&y, &f, DerivativeTarget::Latent)?;
    let (_, sw, chol) = factor(&f)?;

    // Latent predictive at test points, then the label predictive
    let x_test: Vec<f64> = (0..9).map(|i| -4.0 + i as f64).collect();
    let mut ef: DVector<f64> = DVector::zeros(x_test.len());
    let mut varf: DVector<f64> = DVector::zeros(x_test.len());
    for (t, &xt) in x_test.iter().enumerate() {
        let k_star = DVector::from_iterator(N_DATA, x.iter().map(|&xi| kernel(xi, xt)));
        ef[t] = k_star.dot(&g);
        let v = sw.component_mul(&k_star);
        varf[t] = (kernel(xt, xt) - v.dot(&chol.solve(&v))).max(0.0);
    }

    let truth_test =
        DVector::from_iterator(x_test.len(), x_test.iter().map(|&xi| 3.0 * (1.3 * xi).sin()));
    let y_test = lik.sample_labels(&truth_test, &mut rng);
    let prediction = lik.predict(&ef, &varf, Some(&y_test))?;
    let py = prediction.py.unwrap_or_else(|| DVector::zeros(x_test.len()));

    println!("x,ef,varf,ey,vary,y,py");
    for t in 0..x_test.len() {
        println!(
            "{},{},{},{},{},{},{}",
            x_test[t], ef[t], varf[t], prediction.ey[t], prediction.vary[t], y_test[t], py[t]
        );
    }
    Ok(())
}
