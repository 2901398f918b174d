//! Tests for the allow-list, sanitization and upload limits.

use super::files::megabytes;
use super::{ALLOWED_EXTENSIONS, UploadPolicy, is_allowed_file, sanitize_filename};

mod allow_list {
    use super::*;

    #[test]
    fn every_listed_extension_is_allowed() {
        for ext in ALLOWED_EXTENSIONS {
            assert!(is_allowed_file(&format!("file.{ext}")), "{ext}");
        }
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(is_allowed_file("photo.JPG"));
        assert!(is_allowed_file("Slides.PpTx"));
    }

    #[test]
    fn only_last_extension_counts() {
        assert!(is_allowed_file("archive.exe.zip"));
        assert!(!is_allowed_file("notes.txt.exe"));
    }

    #[test]
    fn names_without_extension_are_rejected() {
        assert!(!is_allowed_file("Makefile"));
        assert!(!is_allowed_file("trailing."));
        assert!(!is_allowed_file(""));
    }

    #[test]
    fn dotfile_uses_text_after_dot() {
        assert!(is_allowed_file(".json"));
        assert!(!is_allowed_file(".bashrc"));
    }
}

mod sanitize {
    use super::*;

    #[test]
    fn keeps_safe_names() {
        assert_eq!(sanitize_filename("report-2024_v2.pdf"), "report-2024_v2.pdf");
    }

    #[test]
    fn strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename(r"C:\Users\me\cv.docx"), "C_Users_me_cv.docx");
    }

    #[test]
    fn joins_whitespace_with_underscores() {
        assert_eq!(sanitize_filename("  quarterly   sales.xlsx "), "quarterly_sales.xlsx");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(sanitize_filename("informe año.pdf"), "informe_ao.pdf");
    }

    #[test]
    fn strips_leading_dots() {
        assert_eq!(sanitize_filename(".hidden.txt"), "hidden.txt");
    }

    #[test]
    fn empty_result_falls_back() {
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename("ñññ"), "upload");
    }
}

mod policy {
    use super::*;

    #[test]
    fn body_limit_defaults_to_file_ceiling() {
        let policy = UploadPolicy::new(1024);

        assert_eq!(policy.max_file_size(), 1024);
        assert_eq!(policy.body_limit(), 1024);
    }

    #[test]
    fn ceiling_is_inclusive() {
        let policy = UploadPolicy::new(10).with_body_limit(100);

        assert!(!policy.exceeds(10));
        assert!(policy.exceeds(11));
        assert_eq!(policy.body_limit(), 100);
    }

    #[test]
    fn megabytes_uses_one_decimal() {
        assert_eq!(megabytes(16 * 1024 * 1024), "16.0MB");
        assert_eq!(megabytes(1536 * 1024), "1.5MB");
    }
}
