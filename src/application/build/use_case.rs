//! Build Use Case
//!
//! Orchestrates one module run:
//! 1. Plan the layout and check for outputs of a previous run
//! 2. Read inputs, render templates, compose the skeletons (no writes yet)
//! 3. Materialize the layout and write the scaffold
//! 4. Invoke the binding generator and verify its output
//! 5. Configure and build, relocate the extension, write the shim, clean up
//!
//! Every error is attributed to the stage that raised it.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{ComposedDocument, Layout, ModuleDescriptor, WrittenFile};
use crate::domain::ports::{
    BindingGenerator, FileSystem, GenerationRequest, NullEventSink, PipelineEvent,
    PipelineEventSink, ProcessRunner,
};
use crate::domain::services::{
    compose_source, compose_stub, verify_generated, RenderedFile, ScaffoldTemplates,
};
use crate::domain::value_objects::Stage;
use crate::error::{BindkitError, BindkitResult};
use crate::infrastructure::toolchain::{
    is_extension_artifact, ToolchainDriver, ToolchainStrategy,
};

use super::options::BuildOptions;
use super::result::BuildReport;

/// Everything computed before the first write
struct Prepared {
    layout: Layout,
    header: Vec<u8>,
    rendered: Vec<RenderedFile>,
    source: ComposedDocument,
    stub: ComposedDocument,
    request: GenerationRequest,
    request_json: String,
}

/// Build pipeline, parameterized by its ports
pub struct BuildPipeline<FS>
where
    FS: FileSystem,
{
    file_system: FS,
    runner: Box<dyn ProcessRunner>,
    generator: Box<dyn BindingGenerator>,
    toolchain: Box<dyn ToolchainStrategy>,
}

impl<FS> BuildPipeline<FS>
where
    FS: FileSystem,
{
    pub fn new(
        file_system: FS,
        runner: Box<dyn ProcessRunner>,
        generator: Box<dyn BindingGenerator>,
        toolchain: Box<dyn ToolchainStrategy>,
    ) -> Self {
        Self {
            file_system,
            runner,
            generator,
            toolchain,
        }
    }

    /// Run without progress reporting
    pub fn run(
        &self,
        descriptor: &ModuleDescriptor,
        options: &BuildOptions,
    ) -> BindkitResult<BuildReport> {
        self.run_with_events(descriptor, options, Arc::new(NullEventSink))
    }

    /// Run, reporting progress to `events`
    pub fn run_with_events(
        &self,
        descriptor: &ModuleDescriptor,
        options: &BuildOptions,
        events: Arc<dyn PipelineEventSink>,
    ) -> BindkitResult<BuildReport> {
        let module = descriptor.module_name().unwrap_or_default().to_string();
        events.on_event(PipelineEvent::Started {
            module: module.clone(),
            output: descriptor.output_directory().to_path_buf(),
        });

        let result = self.execute(descriptor, options, events.as_ref());

        match &result {
            Ok(report) => {
                info!(module = %module, files = report.file_count(), "module complete");
                events.on_event(PipelineEvent::Completed {
                    module,
                    files: report.file_count(),
                });
            }
            Err(err) => {
                warn!(module = %module, stage = %err.stage(), error = %err, "module failed");
                events.on_event(PipelineEvent::Failed {
                    module,
                    stage: err.stage(),
                    message: err.to_string(),
                });
            }
        }
        result
    }

    fn execute(
        &self,
        descriptor: &ModuleDescriptor,
        options: &BuildOptions,
        events: &dyn PipelineEventSink,
    ) -> BindkitResult<BuildReport> {
        let module = descriptor.module_name().unwrap_or_default().to_string();
        let stage = |stage: Stage| {
            events.on_event(PipelineEvent::StageStarted {
                module: module.clone(),
                stage,
            })
        };
        let skipped = |stage: Stage| {
            events.on_event(PipelineEvent::StageSkipped {
                module: module.clone(),
                stage,
            })
        };

        stage(Stage::Plan);
        let layout = Layout::plan(descriptor)?;
        let leftovers = self.previous_outputs(&layout)?;
        match leftovers.first() {
            Some(path) if !options.clean => {
                return Err(BindkitError::StaleOutput { path: path.clone() });
            }
            _ => {}
        }

        let prepared = self.prepare(descriptor, layout, options, &stage)?;
        let mut report = BuildReport::new(prepared.layout.clone());

        stage(Stage::Scaffold);
        self.remove_previous(&prepared.layout, &leftovers)?;
        self.scaffold(descriptor, &prepared, options, events, &mut report)?;

        if options.skip_generate {
            skipped(Stage::Generate);
            skipped(Stage::Verify);
        } else {
            stage(Stage::Generate);
            self.generate(&prepared.request)?;
            stage(Stage::Verify);
            self.verify(&prepared)?;
            report.generated = true;
        }

        if options.skip_build {
            skipped(Stage::Build);
            return Ok(report);
        }

        let driver = ToolchainDriver::new(
            self.toolchain.as_ref(),
            self.runner.as_ref(),
            &self.file_system,
        );
        let layout = &prepared.layout;

        driver.compile(layout, &|step_stage, step| {
            stage(step_stage);
            events.on_event(PipelineEvent::CommandStarted {
                stage: step_stage,
                command: step.command_line(),
            });
        })?;

        stage(Stage::Relocate);
        let artifact = driver.locate_artifact(layout)?;
        let dest = driver.relocate(layout, &artifact)?;
        events.on_event(PipelineEvent::ArtifactRelocated {
            from: artifact,
            to: dest.clone(),
        });
        report.artifact = Some(dest);

        let shim = ScaffoldTemplates::render_shim(layout)?;
        report.written.push(self.write_file(&shim, events)?);

        if !options.keep_build_dir {
            self.file_system
                .remove_dir_all(layout.build_root())
                .map_err(|e| BindkitError::filesystem(layout.build_root(), e))?;
            report.build_tree_kept = false;
        }

        Ok(report)
    }

    /// Pure stages: read inputs, render, compose. Nothing is written.
    fn prepare(
        &self,
        descriptor: &ModuleDescriptor,
        layout: Layout,
        options: &BuildOptions,
        stage: &dyn Fn(Stage),
    ) -> BindkitResult<Prepared> {
        stage(Stage::Render);
        let header = self
            .file_system
            .read_bytes(&descriptor.header_path)
            .map_err(|e| BindkitError::filesystem(&descriptor.header_path, e))?;
        let original = self.read(&descriptor.source_path)?;
        let rendered = ScaffoldTemplates::render_all(&layout)?;

        stage(Stage::Compose);
        let source = compose_source(&original, layout.module_name())?;
        let stub = compose_stub()?;

        let request = GenerationRequest {
            root_namespace: layout.root_namespace().to_string(),
            header_files: vec![layout.header_copy().to_path_buf()],
            bindings_source: layout.bindings_source().to_path_buf(),
            stub_file: layout.stub().to_path_buf(),
            request_file: layout.generator_request().to_path_buf(),
            options: options.generator_options.clone(),
        };
        let request_json = format!("{:#}\n", request.to_json());

        Ok(Prepared {
            layout,
            header,
            rendered,
            source,
            stub,
            request,
            request_json,
        })
    }

    fn scaffold(
        &self,
        descriptor: &ModuleDescriptor,
        prepared: &Prepared,
        options: &BuildOptions,
        events: &dyn PipelineEventSink,
        report: &mut BuildReport,
    ) -> BindkitResult<()> {
        let layout = &prepared.layout;
        layout.materialize(&self.file_system)?;

        if options.copy_header_tree {
            match header_tree(&descriptor.header_path, layout.module_dir()) {
                Some(dir) => {
                    let copied = self
                        .file_system
                        .copy_tree(&dir, layout.original_dir())
                        .map_err(|e| BindkitError::filesystem(layout.original_dir(), e))?;
                    debug!(from = %dir.display(), files = copied.len(), "mirrored header tree");
                }
                None => warn!(
                    header = %descriptor.header_path.display(),
                    "header directory not mirrored: it is the working directory or contains the output"
                ),
            }
        }

        // Bytes, never decoded
        let header_copy = layout.header_copy();
        self.file_system
            .copy(&descriptor.header_path, header_copy)
            .map_err(|e| BindkitError::filesystem(header_copy, e))?;
        events.on_event(PipelineEvent::FileWritten {
            path: header_copy.to_path_buf(),
        });
        report
            .written
            .push(WrittenFile::from_bytes(header_copy, &prepared.header));

        let mut files = prepared.rendered.clone();
        files.push(RenderedFile {
            path: layout.bindings_source().to_path_buf(),
            content: prepared.source.render(),
        });
        files.push(RenderedFile {
            path: layout.stub().to_path_buf(),
            content: prepared.stub.render(),
        });
        files.push(RenderedFile {
            path: layout.generator_request().to_path_buf(),
            content: prepared.request_json.clone(),
        });

        for file in &files {
            report.written.push(self.write_file(file, events)?);
        }
        Ok(())
    }

    /// Files a previous run left in the module directory
    fn previous_outputs(&self, layout: &Layout) -> BindkitResult<Vec<PathBuf>> {
        let mut found: Vec<PathBuf> = [layout.build_root(), layout.stub(), layout.shim()]
            .into_iter()
            .filter(|p| self.file_system.exists(p))
            .map(Path::to_path_buf)
            .collect();

        let module_dir = layout.module_dir();
        if self.file_system.exists(module_dir) {
            let native = layout.native_module_name();
            let files = self
                .file_system
                .list_files(module_dir)
                .map_err(|e| BindkitError::filesystem(module_dir, e))?;
            found.extend(
                files
                    .into_iter()
                    .filter(|f| is_extension_artifact(f, &native)),
            );
        }
        Ok(found)
    }

    fn remove_previous(&self, layout: &Layout, leftovers: &[PathBuf]) -> BindkitResult<()> {
        for path in leftovers {
            debug!(path = %path.display(), "removing output of previous run");
            let removed = if path == layout.build_root() {
                self.file_system.remove_dir_all(path)
            } else {
                self.file_system.remove_file(path)
            };
            removed.map_err(|e| BindkitError::filesystem(path, e))?;
        }
        Ok(())
    }

    fn generate(&self, request: &GenerationRequest) -> BindkitResult<()> {
        info!(generator = self.generator.name(), "generating bindings");
        self.generator
            .generate(request)
            .map_err(|e| BindkitError::Generator {
                generator: self.generator.name().to_string(),
                message: e.to_string(),
            })
    }

    fn verify(&self, prepared: &Prepared) -> BindkitResult<()> {
        for (path, skeleton) in [
            (prepared.layout.bindings_source(), &prepared.source),
            (prepared.layout.stub(), &prepared.stub),
        ] {
            let generated = self.read(path)?;
            verify_generated(path, skeleton, &generated)?;
            debug!(path = %path.display(), "generated file verified");
        }
        Ok(())
    }

    fn read(&self, path: &Path) -> BindkitResult<String> {
        self.file_system
            .read(path)
            .map_err(|e| BindkitError::filesystem(path, e))
    }

    fn write_file(
        &self,
        file: &RenderedFile,
        events: &dyn PipelineEventSink,
    ) -> BindkitResult<WrittenFile> {
        self.file_system
            .write(&file.path, &file.content)
            .map_err(|e| BindkitError::filesystem(&file.path, e))?;
        events.on_event(PipelineEvent::FileWritten {
            path: file.path.clone(),
        });
        Ok(WrittenFile::new(&file.path, &file.content))
    }
}

/// Directory of the header, when mirroring it is safe
fn header_tree(header: &Path, module_dir: &Path) -> Option<PathBuf> {
    let dir = header.parent()?;
    let is_cwd = dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cwd || module_dir.starts_with(dir) {
        return None;
    }
    Some(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_tree_is_parent_dir() {
        assert_eq!(
            header_tree(Path::new("src/Example01/Example01.h"), Path::new("out/py")),
            Some(PathBuf::from("src/Example01"))
        );
    }

    #[test]
    fn header_tree_skips_cwd_and_enclosing_dirs() {
        assert_eq!(header_tree(Path::new("Example01.h"), Path::new("out/py")), None);
        assert_eq!(header_tree(Path::new("./Example01.h"), Path::new("out/py")), None);
        assert_eq!(
            header_tree(Path::new("src/Example01.h"), Path::new("src/py_example01")),
            None
        );
    }
}
