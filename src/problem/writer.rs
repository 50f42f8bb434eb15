use std::path::{Path, PathBuf};

use tokio::{fs, io::AsyncWriteExt};

use crate::error::{Error, Result};

use super::Problem;

#[inline]
pub fn input_file(index: usize) -> String {
    format!("in{}.txt", index)
}

#[inline]
pub fn output_file(index: usize) -> String {
    format!("out{}.txt", index)
}

/// Writes every sample of the problem into `<root>/<initial>/`
///
/// The directory must not exist yet, test `i` becomes `in<i>.txt` and `out<i>.txt`.
pub async fn create_problem(root: &Path, problem: &Problem) -> Result<PathBuf> {
    print!("Creating problem: {} ", problem.name);

    let dir = root.join(problem.initial()?.to_string());
    fs::create_dir(&dir).await.map_err(Error::at(&dir))?;
    debug!("Created problem directory {}", dir.display());

    for (index, test) in problem.tests.iter().enumerate() {
        write_file(&dir.join(input_file(index)), &test.input).await?;
        write_file(&dir.join(output_file(index)), &test.output).await?;
    }
    trace!(
        "Wrote {} tests for {} into {}",
        problem.tests.len(),
        problem.name,
        dir.display()
    );

    println!("✔️");
    Ok(dir)
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = fs::File::create(path).await.map_err(Error::at(path))?;
    file.write_all(contents.as_bytes())
        .await
        .map_err(Error::at(path))?;
    file.flush().await.map_err(Error::at(path))?;
    Ok(())
}
