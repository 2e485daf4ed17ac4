//! End-to-end runs of the aggregation pipeline over a small cohort.

use std::fs;
use std::path::Path;

use mirador_cli::pipeline::{AggregateRequest, resolve_layout, run_aggregate};
use mirador_model::AggregationOptions;
use mirador_output::{ProjectDescriptor, convert_to_csv};
use tempfile::TempDir;

fn write(base: &Path, relative: &str, contents: &str) {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create source dir");
    }
    fs::write(path, contents).expect("write source");
}

fn cohort(base: &Path) {
    write(base, "idignore", "G-9\n");
    write(
        base,
        "sources/csv/MasterDataListandEBOVResults.csv",
        "n,id,x,sample,x,date,x,x,vload,x,group\n\
         1,G-3686,,1,,2014-06-01,,,1000,,Epos\n\
         2,G-3686,,2,,2014-06-02,,,4000,,Epos\n\
         3,G-3729,,1,,2014-06-05,,,,,Eneg\n\
         4,G-9,,1,,2014-06-05,,,50,,Epos\n",
    );
    write(
        base,
        "sources/csv/DemographicsFromSim_schieffelin.csv",
        "n,id,age,sex,x,x,x,outcome\n\
         1,G-3686,30,Male,,,,Died\n\
         2,G-9,41,Female,,,,Discharged\n",
    );
    write(
        base,
        "demo-dict.csv",
        "3,SEX,Sex,Demographics,Basic Information,category,1:Male;0:Female\n",
    );
    write(
        base,
        "sources/csv/CaseNotification_schieffelin.csv",
        "id,fever\nG-3686,Yes\nG-3729,Unsure\n",
    );
    write(
        base,
        "case-dict.csv",
        "1,FEV,Fever,Symptoms,Signs,category,1:Yes;0:No\n",
    );
    write(
        base,
        "piccolo-expected.csv",
        "name,display,x,range,y,column\nALB,Albumin,,3.3-5.5 g/dL,,7\n",
    );
    write(
        base,
        "sources/csv/FinalPiccoloData_schieffelin-FinalSummary1.csv",
        "a,b,c,id,d,e,date,alb\n,,,G-3686,,,2014-06-01,4.1\n",
    );
    write(
        base,
        "sources/vcf/SNP-2014.vcf",
        "##fileformat=VCFv4.1\n\
         ##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n\
         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tEBOV_2014_G3686\n\
         KM034562\t800\t.\tC\tT\t.\tPASS\t.\tGT\t1\n",
    );
    write(
        base,
        "sources/vcf/iSNV-all.vcf",
        "##fileformat=VCFv4.1\n\
         ##FORMAT=<ID=AF,Number=1,Type=Float,Description=\"Allele frequency\">\n\
         #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tEBOV_2014_G3686.1\n\
         KM034562\t800\t.\tC\tT\t.\tPASS\t.\tAF\t0.9\n\
         KM034562\t10218\t.\tG\tA\t.\tPASS\t.\tAF\t0.0421\n",
    );
    write(
        base,
        "sources/vcf/clusters.tsv",
        "id\tx\tcode\nG3686\t.\t2.13\n",
    );
}

fn data_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("data.csv"))
        .expect("data")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn aggregates_cohort_into_dataset() {
    let input = TempDir::new().expect("input dir");
    cohort(input.path());
    let output = input.path().join("mirador");

    let outcome = run_aggregate(&AggregateRequest {
        input_dir: input.path().to_path_buf(),
        output_dir: output.clone(),
        config: None,
        options: AggregationOptions::default(),
    })
    .expect("aggregate");

    assert_eq!(outcome.rows, 2);
    assert_eq!(outcome.ignored, 1);
    assert_eq!(outcome.sequenced, None);
    assert_eq!(outcome.summary.positive, 1);
    assert_eq!(outcome.summary.negative, 1);
    assert_eq!(outcome.summary.with_viral_load, 1);
    assert_eq!(outcome.sources[0].source, "master");
    assert_eq!(outcome.sources[0].stats.skipped, 1);

    let lines = data_lines(&output);
    assert_eq!(
        lines[0],
        "GID,DIAG,SEX,FEV,DOPANEL_1,ALB_1,PCR,PCR_MAX,PCR_MIN,PCR_AVE,\
         DOPCR_1,PCR_1,DOPCR_2,PCR_2"
    );
    assert_eq!(
        lines[1],
        "G-3686,1,1,1,2014-06-01,4.1,1000,4000,1000,2500,2014-06-01,1000,2014-06-02,4000"
    );
    // Unmapped "Unsure" stays missing; the empty reading keeps its date.
    assert_eq!(
        lines[2],
        "G-3729,0,\\N,\\N,\\N,\\N,\\N,\\N,\\N,\\N,2014-06-05,\\N,\\N,\\N"
    );
    assert!(!lines.iter().any(|line| line.starts_with("G-9")));

    let descriptor = ProjectDescriptor::read(&outcome.paths.project).expect("descriptor");
    assert_eq!(descriptor.missing, "\\N");
}

#[test]
fn sequencing_and_log_scale_extend_the_dataset() {
    let input = TempDir::new().expect("input dir");
    cohort(input.path());
    let output = input.path().join("mirador");

    let outcome = run_aggregate(&AggregateRequest {
        input_dir: input.path().to_path_buf(),
        output_dir: output.clone(),
        config: None,
        options: AggregationOptions::default()
            .with_sequencing(true)
            .with_log_viral_load(true)
            .with_missing_token("NA"),
    })
    .expect("aggregate");
    assert_eq!(outcome.sequenced, Some(1));

    let lines = data_lines(&output);
    assert!(lines[0].ends_with("SNP800,AF10218,CLUST,MCLUST,SCLUST,MSCLUST"));
    assert!(lines[1].ends_with(",1,0.0421,2,1,3,0"), "{}", lines[1]);
    assert!(lines[2].ends_with(",NA,NA,NA,NA,NA,NA"), "{}", lines[2]);

    let dictionary = fs::read_to_string(output.join("dictionary.csv")).expect("dictionary");
    assert!(dictionary.contains("First measured viral load (log units),float\n"));
}

#[test]
fn layout_file_overrides_paths_and_positions() {
    let input = TempDir::new().expect("input dir");
    cohort(input.path());
    fs::rename(
        input.path().join("demo-dict.csv"),
        input.path().join("demographics.dict"),
    )
    .expect("rename");
    write(
        input.path(),
        "mirador.toml",
        "allele_positions = [800]\n[sources]\ndemographics_dictionary = \"demographics.dict\"\n",
    );

    let (layout, options) =
        resolve_layout(input.path(), None, AggregationOptions::default()).expect("layout");
    assert_eq!(options.allele_positions, vec![800]);
    assert_eq!(
        layout.demographics_dictionary,
        input.path().join("demographics.dict")
    );

    let output = input.path().join("mirador");
    run_aggregate(&AggregateRequest {
        input_dir: input.path().to_path_buf(),
        output_dir: output.clone(),
        config: None,
        options: AggregationOptions::default().with_sequencing(true),
    })
    .expect("aggregate");
    assert!(data_lines(&output)[0].contains("SNP800,AF800,CLUST"));
}

#[test]
fn malformed_dictionary_aborts_without_dataset() {
    let input = TempDir::new().expect("input dir");
    cohort(input.path());
    write(
        input.path(),
        "case-dict.csv",
        "1,FEV,Fever,Symptoms,Signs,category,1:Yes;No\n",
    );
    let output = input.path().join("mirador");
    let err = run_aggregate(&AggregateRequest {
        input_dir: input.path().to_path_buf(),
        output_dir: output.clone(),
        config: None,
        options: AggregationOptions::default(),
    })
    .expect_err("malformed dictionary");
    assert!(format!("{err:#}").contains("case dictionary"));
    assert!(!output.join("data.csv").exists());
}

#[test]
fn flat_csv_round_trip_from_pipeline() {
    let input = TempDir::new().expect("input dir");
    cohort(input.path());
    let output = input.path().join("mirador");
    run_aggregate(&AggregateRequest {
        input_dir: input.path().to_path_buf(),
        output_dir: output.clone(),
        config: None,
        options: AggregationOptions::default(),
    })
    .expect("aggregate");

    let flat = input.path().join("flat.csv");
    let conversion = convert_to_csv(&output, &flat, "").expect("convert");
    assert_eq!(conversion.rows, 2);
    let text = fs::read_to_string(&flat).expect("flat");
    assert!(text.lines().nth(1).expect("row").starts_with("G-3686,Positive,Male,Yes,"));
}
