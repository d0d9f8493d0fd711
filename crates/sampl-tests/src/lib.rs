//! Integration tests for sampl-rs crates.
//!
//! End-to-end checks of the combinator algebra across crate boundaries:
//! extents and coordinate maps composing through deep chains, layout
//! round trips, caching, and the bitmap/PNG adapters.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_abs_diff_eq;
    use sampl_core::{from_fn, lattice_len, Rgba, Sampler, TRANSPARENT};
    use sampl_io::{render, sampler, Bitmap, BitmapOptions, RenderOptions, Source};
    use sampl_math::{bilinear, bilinear_rgba};
    use sampl_ops::{
        apply_pixel, from_flat, sequence, stack, Direction, Layout, Placed, SamplerExt,
    };
    use tempfile::tempdir;

    /// `x + y * w` on the integer lattice, floored in between.
    fn grid(w: f64, h: f64) -> impl Sampler<Item = f64> + Clone + Send + Sync + 'static {
        from_fn(w, h, move |x: f64, y: f64| x.floor() + y.floor() * w)
    }

    fn lattice(w: f64, h: f64) -> impl Iterator<Item = (f64, f64)> {
        let (cols, rows) = (lattice_len(w), lattice_len(h));
        (0..rows).flat_map(move |y| (0..cols).map(move |x| (x as f64, y as f64)))
    }

    // ------------------------------------------------------------------
    // Coordinate algebra
    // ------------------------------------------------------------------

    #[test]
    fn test_scale_extents_and_mapping() {
        let p = grid(3.0, 4.0);
        let s = p.clone().scale(2.0, 0.5).expect("valid factors");
        assert_eq!(s.size(), (6.0, 2.0));
        for &(x, y) in &[(0.0, 0.0), (1.0, 1.0), (5.0, 1.5), (3.3, 0.7)] {
            assert_eq!(s.get(x, y), p.get(x / 2.0, y / 0.5));
        }
        // Non-integral products are kept exactly.
        let odd = grid(3.0, 3.0).scale_uniform(0.5).expect("valid factor");
        assert_eq!(odd.size(), (1.5, 1.5));
    }

    #[test]
    fn test_flip_involution() {
        let p = grid(5.0, 3.0);
        let hh = p.clone().flip_h().flip_h();
        let vv = p.clone().flip_v().flip_v();
        for (x, y) in lattice(5.0, 3.0) {
            assert_eq!(hh.get(x, y), p.get(x, y));
            assert_eq!(vv.get(x, y), p.get(x, y));
        }
        // Exclusive convention: the first column mirrors onto the last.
        assert_eq!(p.clone().flip_h().get(0.0, 0.0), 4.0);
    }

    #[test]
    fn test_rotation_closure() {
        let p = grid(4.0, 3.0);
        let rl = p.clone().rotate(Direction::Right).rotate(Direction::Left);
        let lr = p.clone().rotate(Direction::Left).rotate(Direction::Right);
        let oo = p.clone().rotate(Direction::Over).rotate(Direction::Over);
        assert_eq!(rl.size(), (4.0, 3.0));
        for (x, y) in lattice(4.0, 3.0) {
            assert_eq!(rl.get(x, y), p.get(x, y));
            assert_eq!(lr.get(x, y), p.get(x, y));
            assert_eq!(oo.get(x, y), p.get(x, y));
        }
    }

    #[test]
    fn test_four_quarter_turns() {
        let p = grid(4.0, 3.0);
        let full = p
            .clone()
            .rotate(Direction::Right)
            .rotate(Direction::Right)
            .rotate(Direction::Right)
            .rotate(Direction::Right);
        for (x, y) in lattice(4.0, 3.0) {
            assert_eq!(full.get(x, y), p.get(x, y));
        }
        // Two right turns are one turn over.
        let twice = p.clone().rotate(Direction::Right).rotate(Direction::Right);
        let over = p.rotate(Direction::Over);
        for (x, y) in lattice(4.0, 3.0) {
            assert_eq!(twice.get(x, y), over.get(x, y));
        }
    }

    #[test]
    fn test_transpose_via_turn_and_flip() {
        let p = grid(4.0, 3.0);
        let t = p.clone().rotate(Direction::Right).flip_h();
        assert_eq!(t.size(), (3.0, 4.0));
        for (x, y) in lattice(3.0, 4.0) {
            assert_eq!(t.get(x, y), p.get(y, x));
        }
    }

    #[test]
    fn test_loop_periodicity() {
        let p = grid(3.0, 2.0).wrap();
        for k in -3i32..=3 {
            for (x, y) in lattice(3.0, 2.0) {
                let (dx, dy) = (k as f64 * 3.0, k as f64 * 2.0);
                assert_eq!(p.get(x + dx, y + dy), p.get(x, y));
            }
        }
        assert_eq!(p.get(-1.0, -1.0), p.get(2.0, 1.0));
    }

    #[test]
    fn test_crop_translate_clamp() {
        let p = grid(6.0, 6.0);
        let c = p.clone().crop(2.0, 1.0, 3.0, 2.0).expect("valid crop");
        assert_eq!(c.size(), (3.0, 2.0));
        assert_eq!(c.get(0.0, 0.0), p.get(2.0, 1.0));
        // Reads past the crop go straight to the parent.
        assert_eq!(c.get(4.0, 0.0), p.get(6.0, 1.0));

        let t = p.clone().translate(1.0, 2.0);
        assert_eq!(t.get(1.0, 2.0), p.get(0.0, 0.0));

        let k = p.clamp_coords();
        assert_eq!(k.get(-4.0, 100.0), 30.0);
    }

    #[test]
    fn test_deep_chain_composes() {
        let p = grid(8.0, 4.0);
        let chain = p
            .clone()
            .translate(1.0, 0.0)
            .flip_v()
            .rotate(Direction::Left)
            .scale_uniform(2.0)
            .expect("valid factor")
            .crop(0.0, 0.0, 4.0, 4.0)
            .expect("valid crop")
            .floor_coords()
            .oob(-1.0)
            .boxed();
        assert_eq!(chain.size(), (4.0, 4.0));
        // (3, 1) unscales to (1.5, 0.5); the left turn reads (8 - 0.5 - 1, 1.5),
        // the flip (6.5, 4 - 1.5 - 1) and the translate (5.5, 1.5).
        assert_eq!(chain.get(3.0, 1.0), p.get(5.5, 1.5));
        assert_eq!(chain.get(3.0, 1.0), 13.0);
        assert_eq!(chain.get(-0.5, 0.0), -1.0);
    }

    #[test]
    fn test_rotate_angle_full_turn() {
        let p = grid(5.0, 5.0);
        let r = p.clone().rotate_angle(std::f64::consts::TAU).fill_missing(-1.0);
        assert_eq!(r.size(), (5.0, 5.0));
        for (x, y) in lattice(5.0, 5.0) {
            assert_eq!(r.get(x, y), p.get(x, y));
        }
    }

    // ------------------------------------------------------------------
    // Values and interpolation
    // ------------------------------------------------------------------

    #[test]
    fn test_interpolation_boundary_agreement() {
        let p = from_fn(4.0, 4.0, |x: f64, y: f64| x + y * 4.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let i = p.interpolate(move |a, b, c, d, bx, by| {
            counter.fetch_add(1, Ordering::SeqCst);
            bilinear(a, b, c, d, bx, by)
        });
        assert_eq!(i.get(1.0, 1.0), 5.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_abs_diff_eq!(i.get(1.5, 1.5), 7.5, epsilon = 1e-12);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_interpolate_as_always_resolves() {
        let p = from_fn(2.0, 2.0, |x: f64, _| x);
        let as_text = p.interpolate_as(|a, b, _, _, bx, _| format!("{a}-{b}@{bx}"));
        assert_eq!(as_text.get(0.0, 0.0), "0-0@0");
        assert_eq!(as_text.get(0.5, 0.0), "0-1@0.5");
    }

    #[test]
    fn test_bilinear_reference_values() {
        let r = |bx, by| bilinear(1.0f64, 2.0, 3.0, 4.0, bx, by);
        assert_eq!(r(0.0, 0.0), 1.0);
        assert_eq!(r(1.0, 0.0), 2.0);
        assert_eq!(r(0.0, 1.0), 3.0);
        assert_eq!(r(1.0, 1.0), 4.0);
        assert_abs_diff_eq!(r(0.5, 0.5), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(r(0.25, 0.75), 2.75, epsilon = 1e-12);
    }

    #[test]
    fn test_color_bilinear_blends_every_channel() {
        let black: Rgba = [0.0, 0.0, 0.0, 0.0];
        let white: Rgba = [1.0, 1.0, 1.0, 1.0];
        let mid = bilinear_rgba(black, white, black, white, 0.5, 0.5);
        for c in mid {
            assert_abs_diff_eq!(c, 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_map_and_channel() {
        let p = from_fn(2.0, 2.0, |x: f64, y: f64| [x as f32, y as f32, 0.25, 1.0]);
        let doubled = (&p).map(|c: Rgba| c[2] * 2.0);
        assert_eq!(doubled.get(1.0, 1.0), 0.5);
        assert_eq!((&p).channel(1).get(0.0, 1.0), 1.0);
    }

    // ------------------------------------------------------------------
    // Construction and compositing
    // ------------------------------------------------------------------

    #[test]
    fn test_compositing_identity() {
        let bg: Rgba = [0.2, 0.4, 0.6, 0.5];
        assert_eq!(apply_pixel(bg, [0.9, 0.9, 0.9, 0.0]), bg);
        assert_eq!(apply_pixel(bg, [0.1, 0.2, 0.3, 1.0]), [0.1, 0.2, 0.3, 1.0]);
        let half = apply_pixel([0.0, 0.0, 0.0, 0.8], [1.0, 1.0, 1.0, 0.5]);
        assert_abs_diff_eq!(half[0], 0.5, epsilon = 1e-6);
        assert_eq!(half[3], 0.8);
    }

    #[test]
    fn test_stack_top_wins_in_local_space() {
        let bottom: Box<dyn Sampler<Item = f64> + Send + Sync> = Box::new(grid(4.0, 4.0));
        let top: Box<dyn Sampler<Item = f64> + Send + Sync> =
            Box::new(from_fn(2.0, 2.0, |x: f64, y: f64| 100.0 + x.floor() + y.floor() * 10.0));
        let s = stack(vec![Placed::new(bottom, 0.0, 0.0), Placed::new(top, 1.0, 2.0)], -1.0)
            .expect("non-empty");
        assert_eq!(s.size(), (4.0, 4.0));
        assert_eq!(s.get(2.0, 3.0), 111.0);
        assert_eq!(s.get(0.0, 3.0), 12.0);
        assert_eq!(s.get(5.0, 0.0), -1.0);
    }

    #[test]
    fn test_sequence_over_layers() {
        let red = from_fn(2.0, 2.0, |_, _| [1.0f32, 0.0, 0.0, 1.0]).boxed();
        let veil = from_fn(3.0, 1.0, |_, _| [0.0f32, 0.0, 1.0, 0.5]).boxed();
        let seq = sequence(vec![red, veil]).expect("non-empty");
        assert_eq!(seq.size(), (3.0, 2.0));
        let c = seq.get(0.0, 0.0);
        assert_abs_diff_eq!(c[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(c[2], 0.5, epsilon = 1e-6);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn test_flat_export_round_trip() {
        let p = grid(5.0, 3.0).rotate(Direction::Left).flip_v();
        let (w, h) = p.size();
        let xy = from_flat(p.to_flat_xy(), w, h, Layout::Xy, f64::NAN).expect("valid extents");
        let yx = from_flat(p.to_flat_yx(), w, h, Layout::Yx, f64::NAN).expect("valid extents");
        for (x, y) in lattice(w, h) {
            assert_eq!(xy.get(x, y), p.get(x, y));
            assert_eq!(yx.get(x, y), p.get(x, y));
        }
        assert!(xy.get(w, 0.0).is_nan());
    }

    #[test]
    fn test_nested_exports_agree_with_views() {
        let p = grid(3.0, 2.0);
        let cols = p.to_array_xy();
        let rows = p.to_array_yx();
        for (x, y) in lattice(3.0, 2.0) {
            let (xi, yi) = (x as usize, y as usize);
            assert_eq!(cols[xi][yi], p.get(x, y));
            assert_eq!(rows[yi][xi], p.get(x, y));
            assert_eq!(p.rows().get(yi).get(xi), p.get(x, y));
            assert_eq!(p.columns().get(xi).get(yi), p.get(x, y));
        }
    }

    #[test]
    fn test_parallel_export_matches_sequential() {
        let p = grid(17.0, 9.0).rotate_angle(0.3).fill_missing(-1.0);
        assert_eq!(p.par_to_flat_xy(), p.to_flat_xy());
        assert_eq!(p.par_to_flat_yx(), p.to_flat_yx());
    }

    // ------------------------------------------------------------------
    // Caching
    // ------------------------------------------------------------------

    #[test]
    fn test_cache_transparency() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let p = from_fn(4.0, 4.0, move |x: f64, y: f64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * 10.0 + y
        });
        let cached = p.with_cache();
        for (x, y) in lattice(4.0, 4.0) {
            assert_eq!(cached.get(x, y), x * 10.0 + y);
        }
        assert_eq!(reads.load(Ordering::SeqCst), 16);
        for (x, y) in lattice(4.0, 4.0) {
            assert_eq!(cached.get(x, y), x * 10.0 + y);
        }
        assert_eq!(reads.load(Ordering::SeqCst), 16);
        assert_eq!(cached.stats().hits, 16);
    }

    #[test]
    fn test_stash_detaches_from_parent() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let p = from_fn(3.0, 3.0, move |x: f64, y: f64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x + y
        });
        let stashed = p.stash(0.0).expect("valid extents");
        assert_eq!(reads.load(Ordering::SeqCst), 9);
        assert_eq!(stashed.get(2.0, 1.0), 3.0);
        assert_eq!(stashed.get(2.5, 1.5), 3.0);
        assert_eq!(reads.load(Ordering::SeqCst), 9);
    }

    // ------------------------------------------------------------------
    // Bitmaps and files
    // ------------------------------------------------------------------

    fn checker_bitmap(w: u32, h: u32) -> Bitmap {
        let mut bmp = Bitmap::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                bmp.set_pixel(x, y, [v, (x * 20) as u8, (y * 20) as u8, 255]);
            }
        }
        bmp
    }

    #[test]
    fn test_render_matches_direct_reads() {
        let bmp = checker_bitmap(5, 3);
        let turned = sampler(bmp, &BitmapOptions::default().with_interpolation(false))
            .rotate(Direction::Left)
            .flip_h();
        let out = render(&turned, &RenderOptions::default()).expect("render");
        assert_eq!((out.width(), out.height()), (3, 5));
        for (x, y) in lattice(3.0, 5.0) {
            let expected = sampl_core::color::rgba_to_u8(turned.get(x, y));
            assert_eq!(out.pixel(x as u32, y as u32), Some(expected));
        }
    }

    #[test]
    fn test_png_round_trip_through_sampler() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checker.png");
        let bmp = checker_bitmap(6, 4);
        sampl_io::png::write(&path, &bmp).expect("Failed to write PNG");

        let s = Source::from(path.as_path())
            .load(BitmapOptions::default().with_interpolation(false))
            .wait()
            .expect("Failed to load PNG");
        assert_eq!(s.size(), (6.0, 4.0));
        let back = render(&s, &RenderOptions::default()).expect("render");
        assert_eq!(back, bmp);
    }

    #[test]
    fn test_png_pipeline_over_and_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("over.png");
        let bmp = checker_bitmap(4, 4);
        let over = sampler(bmp.clone(), &BitmapOptions::default().with_interpolation(false))
            .rotate(Direction::Over);
        sampl_io::png::write(&path, &render(&over, &RenderOptions::default()).expect("render"))
            .expect("write");

        let again = sampl_io::load_file(&path)
            .expect("load")
            .sampler(TRANSPARENT)
            .rotate(Direction::Over);
        assert_eq!(render(&again, &RenderOptions::default()).expect("render"), bmp);
    }
}
