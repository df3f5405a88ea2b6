//! Dataset info command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use illusion_eval::dataset::{
    self, GroundingAnnotation, IllusionCategory, PairInfo, VqaAnnotation, category_for_id,
};

pub fn run(data_dir: PathBuf, verbose: bool) -> Result<()> {
    let pair_info_path = data_dir.join(dataset::PAIR_INFO_FILE);
    if verbose {
        eprintln!("Loading pair info from: {}", pair_info_path.display());
    }
    let pair_info = PairInfo::from_path(&pair_info_path)
        .with_context(|| format!("Failed to load pair info from {}", pair_info_path.display()))?;

    println!("Comparison pairs:");
    println!("  {:<14}: {}", "samediff_qa", pair_info.samediff_qa.len());
    println!("  {:<14}: {}", "subj_qa", pair_info.subj_qa.len());
    println!("  {:<14}: {}", "desc_qa", pair_info.desc_qa.len());
    println!("  {:<14}: {}", "localization", pair_info.localization.len());

    let vqa_path = data_dir.join(dataset::VQA_ANNOTATION_FILE);
    if vqa_path.exists() {
        let annotation: VqaAnnotation = dataset::load_json(&vqa_path)
            .with_context(|| format!("Failed to load annotation from {}", vqa_path.display()))?;
        println!();
        println!("VQA data points: {}", annotation.len());
        print_category_counts(annotation.keys())?;
    }

    let vg_path = data_dir.join(dataset::VG_ANNOTATION_FILE);
    if vg_path.exists() {
        let annotation: GroundingAnnotation = dataset::load_json(&vg_path)
            .with_context(|| format!("Failed to load annotation from {}", vg_path.display()))?;
        println!();
        println!("Grounding data points: {}", annotation.len());
        print_category_counts(annotation.keys())?;
    }

    Ok(())
}

fn print_category_counts<'a>(ids: impl Iterator<Item = &'a String>) -> Result<()> {
    let mut counts: BTreeMap<IllusionCategory, usize> = IllusionCategory::all()
        .iter()
        .map(|category| (*category, 0))
        .collect();
    for id in ids {
        let category = category_for_id(id)
            .with_context(|| format!("Failed to categorize data ID {id}"))?;
        *counts.entry(category).or_default() += 1;
    }

    for (category, count) in counts {
        println!("  {:<14}: {}", category.to_string(), count);
    }
    Ok(())
}
