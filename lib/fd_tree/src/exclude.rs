use regex::Regex;
use thiserror::Error;

/// Regex rules deciding which entries a scan leaves out. Rules are matched
/// against the path relative to the scan root, eg: `./sub/file`, with a
/// trailing `/` for directories
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    list: Vec<Regex>,
}
#[derive(Error, Debug)]
pub enum ExcludeListError {
    #[error("Exclude List Error: Failed to parse rule to regex\nrule: {rule}\nreason: {err}")]
    UnparsableRule { rule: String, err: regex::Error },
}
fn unparerr<S: std::string::ToString>(rule: S) -> impl Fn(regex::Error) -> ExcludeListError {
    move |err: regex::Error| -> ExcludeListError {
        ExcludeListError::UnparsableRule {
            rule: rule.to_string(),
            err,
        }
    }
}
impl ExcludeList {
    pub fn from<S: AsRef<str>>(rules: &[S]) -> Result<ExcludeList, ExcludeListError> {
        ExcludeList::default().join(rules)
    }
    pub fn join<S: AsRef<str>>(self, rules: &[S]) -> Result<ExcludeList, ExcludeListError> {
        let mut list = self.list;
        for rule in rules {
            let rule = rule.as_ref();
            let rgx = Regex::new(rule).map_err(unparerr(rule))?;
            list.push(rgx);
        }
        Ok(ExcludeList { list })
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn should_exclude(&self, rel_path: &str, is_dir: bool) -> bool {
        let path_as_string = {
            let mut tmp = rel_path.to_string();
            if is_dir {
                tmp.push('/');
            }
            tmp
        };

        self.list
            .iter()
            .any(|rule| rule.is_match(path_as_string.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ExcludeList, ExcludeListError};

    #[test]
    fn test() {
        let empty = ExcludeList::from::<&str>(&[]).unwrap();
        assert!(empty.is_empty());
        assert!(!empty.should_exclude("./anything", false));

        let list = ExcludeList::from(&["\\.git/$", "\\.tmp$"]).unwrap();
        assert!(!list.is_empty());
        assert!(list.should_exclude("./.git", true));
        assert!(!list.should_exclude("./.git", false));
        assert!(list.should_exclude("./sub/file.tmp", false));
        assert!(!list.should_exclude("./sub/file.tmp.keep", false));

        let list = list.join(&[String::from("^\\./build/")]).unwrap();
        assert!(list.should_exclude("./build", true));
        assert!(!list.should_exclude("./sub/build", true));

        assert!(matches!(
            ExcludeList::from(&["(unclosed"]),
            Err(ExcludeListError::UnparsableRule { .. })
        ));
    }
}
