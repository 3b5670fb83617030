use clap::Parser;
use log::{error, info, warn};

use rastery::args::Args;
use rastery::prelude::*;
use rastery::shaders::{PhongShader, PhongUniforms, TextureShader, TextureUniforms};
use rastery::window::{FrameLimiter, Window, WindowEvent};

/// The shading path picked from whichever maps were supplied.
enum Scene {
    Phong(Program<PhongShader>),
    Textured(Program<TextureShader>),
}

impl Scene {
    fn load(args: &Args, mvp: Mat4) -> Result<Self, LoadError> {
        let diffuse = match &args.diffuse {
            Some(path) => Texture::from_file(path)?,
            None => {
                warn!("no diffuse map given, using plain white");
                Texture::from_raw(1, 1, 3, ChannelOrder::Rgb, vec![255, 255, 255])?
            }
        };

        match (&args.normal, &args.specular) {
            (Some(normal), Some(specular)) => {
                let uniforms = PhongUniforms::new(
                    mvp,
                    args.light,
                    diffuse,
                    Texture::from_file(normal)?,
                    Texture::from_file(specular)?,
                );
                Ok(Scene::Phong(Program::with_uniforms(PhongShader, uniforms)))
            }
            _ => {
                info!("normal or specular map missing, falling back to unlit texturing");
                Ok(Scene::Textured(Program::with_uniforms(
                    TextureShader,
                    TextureUniforms { mvp, diffuse },
                )))
            }
        }
    }

    fn draw(&mut self, ctx: &mut RenderContext, mesh: &Mesh) {
        match self {
            Scene::Phong(program) => ctx.draw_mesh(program, mesh),
            Scene::Textured(program) => ctx.draw_mesh(program, mesh),
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let mesh = Mesh::from_obj(&args.obj).map_err(|e| e.to_string())?;
    let camera = Camera::looking_at_origin(args.eye);
    let mut scene = Scene::load(&args, camera.view_projection()).map_err(|e| e.to_string())?;

    let mut window = Window::new("Rastery", args.width, args.height)?;
    let mut ctx = RenderContext::new(window.width(), window.height(), args.render_settings());
    let mut limiter = FrameLimiter::new(&window);

    info!(
        "rendering {} face(s) at {}x{} with {} interpolation",
        mesh.num_faces(),
        ctx.width(),
        ctx.height(),
        ctx.settings().interpolation
    );

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                window.resize(width, height)?;
                ctx.resize(width, height);
            }
            WindowEvent::None => {}
        }

        ctx.begin_frame();
        scene.draw(&mut ctx, &mesh);
        ctx.end_frame();

        window.present(ctx.backbuffer().as_bytes())?;
        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(args).inspect_err(|e| error!("{e}"))
}
