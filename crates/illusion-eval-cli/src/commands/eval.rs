//! Evaluation command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use illusion_eval::dataset::{
    self, GroundingAnnotation, GroundingPredictions, PairInfo, VqaAnnotation, VqaPredictions,
};
use illusion_eval::{EvalConfig, EvalReport};

#[allow(clippy::too_many_arguments)]
pub fn run(
    vqa_predictions: Option<PathBuf>,
    vg_predictions: Option<PathBuf>,
    data_dir: PathBuf,
    save_dir: Option<PathBuf>,
    threshold: f64,
    parallel: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    if vqa_predictions.is_none() && vg_predictions.is_none() {
        bail!("specify at least one prediction file (--vqa-predictions / --vg-predictions)");
    }

    let pair_info_path = data_dir.join(dataset::PAIR_INFO_FILE);
    let pair_info = PairInfo::from_path(&pair_info_path)
        .with_context(|| format!("Failed to load pair info from {}", pair_info_path.display()))?;

    let config = EvalConfig::builder()
        .iou_threshold(threshold)
        .parallel(parallel)
        .build();

    let mut report = EvalReport::new();
    report.vqa_predictions.clone_from(&vqa_predictions);
    report.vg_predictions.clone_from(&vg_predictions);

    if let Some(path) = &vqa_predictions {
        if verbose {
            eprintln!("Scoring VQA predictions from: {}", path.display());
        }
        let predictions: VqaPredictions = dataset::load_json(path)
            .with_context(|| format!("Failed to load predictions from {}", path.display()))?;
        let annotation_path = data_dir.join(dataset::VQA_ANNOTATION_FILE);
        let annotation: VqaAnnotation = dataset::load_json(&annotation_path).with_context(|| {
            format!("Failed to load annotation from {}", annotation_path.display())
        })?;

        let results = illusion_eval::eval_vqa(&predictions, &pair_info, &annotation, &config)?;
        report.push_vqa(&results);
    }

    if let Some(path) = &vg_predictions {
        if verbose {
            eprintln!("Scoring grounding predictions from: {}", path.display());
        }
        let predictions: GroundingPredictions = dataset::load_json(path)
            .with_context(|| format!("Failed to load predictions from {}", path.display()))?;
        let annotation_path = data_dir.join(dataset::VG_ANNOTATION_FILE);
        let annotation: GroundingAnnotation =
            dataset::load_json(&annotation_path).with_context(|| {
                format!("Failed to load annotation from {}", annotation_path.display())
            })?;

        let results = illusion_eval::eval_vg(&predictions, &pair_info, &annotation, &config)?;
        report.push_grounding(&results);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Prediction files - VQA: {} | VG: {}",
            display_opt(&vqa_predictions),
            display_opt(&vg_predictions)
        );
        print!("{}", report.render());
    }

    if let Some(dir) = save_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        report.write_json(&dir.join("results.json"))?;
        report.write_csv(&dir.join("results.csv"))?;
        println!("Saved to: {}", dir.display());
    }

    Ok(())
}

fn display_opt(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "none".to_string(), |p| p.display().to_string())
}
